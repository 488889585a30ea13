use config::Config;
use ecomegane_rs::api::endpoint::PORTAL_URL;
use ecomegane_rs::model::TimeSeries;

#[derive(Clone, serde::Deserialize)]
pub struct EcoMeganeConfig {
    api_url: String,
    username: String,
    password: String,
    site_id: String,
}

pub fn read_settings() -> Result<EcoMeganeConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("EM"))?
        .set_default("api_url", PORTAL_URL)?;

    settings.try_into()
}

fn print_series(title: &str, series: &TimeSeries) {
    println!("{}", title);
    for (timestamp, kwh) in series.iter() {
        match kwh {
            Some(kwh) => println!("{} {:.2}", timestamp, kwh),
            None => println!("{} -", timestamp),
        }
    }
    println!("total {:.2} kWh", series.total());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = read_settings()?;
    let credentials =
        ecomegane_rs::client(settings.username, settings.password).with_base_url(settings.api_url);
    let today = chrono::Local::now().date_naive();

    let session = ecomegane_rs::open(&credentials).await?;

    let hourly = ecomegane_rs::get_hourly_kwh(&session, &settings.site_id, today).await?;
    print_series("hourly", &hourly);

    let daily = ecomegane_rs::get_daily_kwh(&session, &settings.site_id, today).await?;
    print_series("daily", &daily);

    ecomegane_rs::close(session);
    Ok(())
}
