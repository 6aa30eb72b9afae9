fn main() -> anyhow::Result<()> {
    flickview::logging::init();
    flickview::cli::run()
}
