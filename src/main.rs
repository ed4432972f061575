// Timetable Planner
// Command-line entry point: search the lecture catalog

use anyhow::{bail, Result};

use timetable_planner::models::search_option::SearchOption;
use timetable_planner::services::catalog::load_catalogs;
use timetable_planner::services::lecture_filter::LectureSearch;
use timetable_planner::services::settings::{load_settings_or_default, SettingsService};
use timetable_planner::utils::time::slot_label;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Timetable Planner");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((query, catalog_paths)) = args.split_first() else {
        bail!("usage: timetable-planner <query> <catalog.json>...");
    };
    if catalog_paths.is_empty() {
        bail!("usage: timetable-planner <query> <catalog.json>...");
    }

    let settings_service = SettingsService::from_project_dirs();
    let settings = load_settings_or_default(&settings_service);
    log::info!(
        "Loaded settings: page_size={}, slots {}-{}",
        settings.page_size,
        settings.min_slot,
        settings.max_slot
    );

    let catalog = load_catalogs(catalog_paths)?;
    let mut search = LectureSearch::new(catalog, settings.page_size);
    search.set_options(SearchOption::new().with_query(query.as_str()));

    let results = search.results();
    println!(
        "{} of {} matching lectures (page {}/{})",
        results.visible().len(),
        results.total(),
        results.current_page(),
        results.last_page()
    );

    for lecture in search.visible() {
        println!(
            "{:<12} {:<30} {:>4} {:<16} {}",
            lecture.id, lecture.title, lecture.credits, lecture.major, lecture.grade
        );
        for meeting in lecture.meetings() {
            let (Some(first), Some(last)) = (meeting.range.first(), meeting.range.last()) else {
                continue;
            };
            let start = slot_label(*first).unwrap_or_else(|| first.to_string());
            let end = slot_label(*last).unwrap_or_else(|| last.to_string());
            println!("    {} {} .. {} {}", meeting.day, start, end, meeting.room);
        }
    }

    Ok(())
}
