pub(crate) fn validate_color_count(value: &str) -> Result<usize, String> {
    let num = value
        .parse::<usize>()
        .map_err(|_| "Not a valid positive integer".to_string())?;
    if num == 0 {
        return Err("Number must be greater than 0".to_string());
    }
    Ok(num)
}

pub(crate) fn validate_distance_threshold(value: &str) -> Result<f64, String> {
    let num = value
        .parse::<f64>()
        .map_err(|_| "Not a valid floating point number".to_string())?;
    if num <= 0.0 || !num.is_finite() {
        return Err("Number must be greater than 0".to_string());
    }
    Ok(num)
}
