//! Plain-text rendering of the view model. Stands in for the real UI, which
//! is out of scope here; everything it needs is on `AppViewModel`.

use magpie_core::{AppViewModel, DownloadRowView, NoticeLevel};

const BAR_WIDTH: usize = 20;

pub fn render(view: &AppViewModel) {
    if let Some(notice) = &view.notice {
        let prefix = match notice.level {
            NoticeLevel::Info => "::",
            NoticeLevel::Error => "!!",
        };
        println!("{prefix} {}", notice.text);
    }

    for row in &view.downloads {
        println!("{}", format_download_row(row));
    }
}

pub fn render_summary(view: &AppViewModel) {
    println!("--- session complete ---");
    for row in &view.downloads {
        println!(
            "{} [{}] {} ({:.0}%)",
            row.status.label(),
            row.kind.label(),
            row.title,
            row.progress
        );
    }
}

fn format_download_row(row: &DownloadRowView) -> String {
    let speed = row.speed.as_deref().unwrap_or("-");
    format!(
        "[{}] {:>11} {:>6.1}% {} {}",
        progress_bar(row.progress),
        row.status.label(),
        row.progress,
        speed,
        row.title
    )
}

fn progress_bar(progress: f32) -> String {
    let filled = ((progress / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
