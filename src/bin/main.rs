mod app_state;
mod config;

use std::io::{BufRead, Write};
use std::sync::Arc;

use places::*;

use crate::app_state::{Alert, AppState};
use crate::config::CONFIG;

fn main() {
    log::set_max_level(CONFIG.general.log_level.to_level_filter());
    pretty_env_logger::init();

    let api_key = std::env::var(&CONFIG.search.api_key_var).ok();
    if api_key.is_none() {
        log::warn!(
            "{} is not set. Every search will fail until it is.",
            CONFIG.search.api_key_var
        );
    }
    let resolver = Arc::new(KeywordSearch::new(CONFIG.search.endpoint.clone(), api_key));

    let center = Coordinate::new(CONFIG.map.center_latitude, CONFIG.map.center_longitude)
        .expect("The configured map center is not a valid coordinate.");
    let region = Region::new(center, CONFIG.map.latitude_delta, CONFIG.map.longitude_delta);

    let mut app_state = AppState::new(region, resolver);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("search> ");
        std::io::stdout().flush().expect("Could not flush stdout.");

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        app_state.set_query(line);
        app_state.submit();

        // One outstanding call, awaited to completion. No timeout is
        // configured, so a hung request hangs the prompt with it.
        while app_state.is_searching() {
            app_state.poll_searches();
            std::thread::sleep(std::time::Duration::from_millis(16));
        }

        match app_state.take_alert() {
            Some(Alert::PermissionDenied) => println!("Location permission was denied."),
            Some(Alert::NoResults) => println!("No places matched the query."),
            Some(Alert::SearchFailed(reason)) => println!("The search failed: {}", reason),
            None => render(&app_state),
        }
    }
}

fn render(app_state: &AppState) {
    println!(
        "Map centered on {}, spanning {:.4} x {:.4} degrees",
        app_state.region.center, app_state.region.latitude_delta, app_state.region.longitude_delta,
    );
    if app_state.places.is_empty() {
        println!("No markers.");
        return;
    }
    for place in &app_state.places {
        let visibility = if app_state.region.contains(&place.coordinate) {
            "shown"
        } else {
            "off-screen"
        };
        println!(
            "  [{}] {} {} | {}",
            visibility, place.coordinate, place.label, place.address
        );
    }
}
