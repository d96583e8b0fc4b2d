use portfolio_site;

fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the portfolio site
    portfolio_site::run_app()
}
