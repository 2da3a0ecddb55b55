use admin_console::settings::*;

fn main() -> anyhow::Result<()> {
    // Default location for this build profile
    let project_settings = parse_settings(None)?;
    println!("Loaded settings: {:?}", project_settings);
    println!("Request timeout: {:?}", project_settings.api.timeout());

    // An empty path must fail
    let is_err = parse_settings(Some("")).is_err();
    println!("Error on invalid path: {:?}", is_err);

    // $ cargo run --bin settings_demo -- --settings=settings/release.toml
    // $ ADMIN_CONSOLE__API__BASE_URL=http://localhost:8001 cargo run --bin settings_demo
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    println!("Loaded settings: {:?}", project_settings);

    Ok(())
}
