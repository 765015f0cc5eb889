fn main() -> colormap::Result<()> {
    colormap::run(wild::args_os())
}
