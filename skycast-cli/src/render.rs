//! Terminal rendering of the weather view-model: current-conditions
//! banner, hourly strip, daily list.

use skycast_core::WeatherViewModel;

const HOURS_PER_LINE: usize = 6;

pub fn print(view: &WeatherViewModel) {
    println!("{}", format_view(view));
}

fn format_view(view: &WeatherViewModel) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", view.location_name));
    out.push_str(&format!("{}°  {}\n", view.temperature, view.condition));
    out.push_str(&format!(
        "feels like {}° · wind {:.1} kph {} · humidity {}%\n",
        view.feels_like, view.wind_kph, view.wind_dir, view.humidity_pct
    ));

    if view.hourly.is_empty() && view.daily.is_empty() {
        out.push_str("\nNo forecast data available.\n");
        return out;
    }

    if !view.hourly.is_empty() {
        out.push_str("\nNext hours:\n");
        for line in view.hourly.chunks(HOURS_PER_LINE) {
            let cells: Vec<String> =
                line.iter().map(|h| format!("{} {:>3}°", h.time, h.temp)).collect();
            out.push_str(&format!("  {}\n", cells.join("   ")));
        }
    }

    if !view.daily.is_empty() {
        out.push_str("\nDaily forecast:\n");
        for day in &view.daily {
            out.push_str(&format!(
                "  {:<10} {:>3}° - {}°  {}\n",
                day.weekday, day.min_temp, day.max_temp, day.condition
            ));
        }
    }

    out
}
