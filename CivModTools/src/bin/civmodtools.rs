fn main() -> anyhow::Result<()> {
    civmodtools::cli::run_cli()
}
