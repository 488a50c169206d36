//! Human-readable rendering of a [`WeatherReport`].

use std::io::Write;

use crate::{
    error::Result,
    model::{WeatherReport, kelvin_to_celsius},
};

/// Write the standard summary, temperatures converted to Celsius.
///
/// Nothing is written when the report has no weather condition.
pub fn render(report: &WeatherReport, out: &mut impl Write) -> Result<()> {
    let condition = report.condition()?;
    let main = &report.main;
    let temp = kelvin_to_celsius(main.temp);
    let feels_like = kelvin_to_celsius(main.feels_like);
    let temp_min = kelvin_to_celsius(main.temp_min);
    let temp_max = kelvin_to_celsius(main.temp_max);

    writeln!(out, "Weather in {}, {}:", report.name, report.sys.country)?;
    writeln!(out, "Description: {}", condition.description)?;
    writeln!(out, "Temperature: {temp:.2}°C")?;
    writeln!(out, "Feels Like: {feels_like:.2}°C")?;
    writeln!(out, "Min Temperature: {temp_min:.2}°C")?;
    writeln!(out, "Max Temperature: {temp_max:.2}°C")?;
    writeln!(out, "Pressure: {} hPa", main.pressure)?;
    writeln!(out, "Humidity: {}%", main.humidity)?;
    writeln!(out, "Wind Speed: {:.2} m/s", report.wind.speed)?;
    writeln!(out, "Cloudiness: {}%", report.clouds.all)?;

    Ok(())
}

/// Extra lines shown with `--details`.
pub fn render_details(report: &WeatherReport, out: &mut impl Write) -> Result<()> {
    let coord = report.coord;
    writeln!(out, "Coordinates: {:.4}, {:.4}", coord.lat, coord.lon)?;
    writeln!(
        out,
        "Wind Direction: {}° ({})",
        report.wind.deg,
        compass_point(report.wind.deg)
    )?;
    if report.wind.gust > 0.0 {
        writeln!(out, "Wind Gust: {:.2} m/s", report.wind.gust)?;
    }
    if report.visibility > 0 {
        writeln!(out, "Visibility: {} m", report.visibility)?;
    }
    if report.sys.sunrise > 0 {
        writeln!(out, "Sunrise: {}", local_clock(report, report.sys.sunrise))?;
    }
    if report.sys.sunset > 0 {
        writeln!(out, "Sunset: {}", local_clock(report, report.sys.sunset))?;
    }

    Ok(())
}

fn local_clock(report: &WeatherReport, ts: i64) -> String {
    report
        .local_time(ts)
        .map(|t| t.format("%H:%M (UTC%:z)").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 16-point compass name for a meteorological wind direction.
pub fn compass_point(deg: u16) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let idx = ((f64::from(deg % 360) / 22.5).round() as usize) % POINTS.len();
    POINTS[idx]
}
