//! Terminal rendering for the contracts table and the contract card.

use clausewise_core::badge::paint;
use clausewise_core::contract::percent;
use clausewise_core::upload::{UploadQueue, UploadStatus, format_file_size};
use clausewise_core::{
    ContractList, ContractRecord, Evidence, FilterState, PageView, Risk, Status,
};

const MAX_LIST_ITEMS: usize = 10;
const BAR_WIDTH: usize = 20;

// ── List ──

/// Print one page of the contracts table with its paging footer.
pub fn print_page(list: &ContractList, page: &PageView<'_>, colour: bool) {
    let count = list.active_filter_count();
    if count > 0 {
        println!("Filters ({count}): {}", filter_labels(list.filters()).join(", "));
    }
    println!("{}", page.summary());
    println!();

    if page.rows.is_empty() {
        println!("No contracts found");
        println!("{}", list.empty_message());
        return;
    }

    println!(
        "  {:<10} {:<34} {:<38} {:<11} {:<14} {:<6}",
        "ID", "CONTRACT", "PARTIES", "EXPIRY", "STATUS", "RISK"
    );
    for record in &page.rows {
        print_row(record, colour);
    }
    println!();

    if page.total_pages > 1 {
        let prev = if page.has_previous { "< prev" } else { "      " };
        let next = if page.has_next { "next >" } else { "" };
        println!(
            "  {prev}  Page {} of {}  {next}",
            page.current_page, page.total_pages
        );
    }
}

fn print_row(record: &ContractRecord, colour: bool) {
    let status = format!("{} {}", record.status.icon(), record.status);
    println!(
        "  {:<10} {:<34} {:<38} {:<11} {} {}",
        truncate(&record.id, 10),
        truncate(&record.name, 34),
        truncate(&record.parties, 38),
        truncate(&record.expiry, 11),
        pad_painted(&status, 14, record.status.tone(), colour),
        paint(record.risk.as_str(), record.risk.tone(), colour),
    );
}

/// Print per-facet counts over the whole store.
pub fn print_facets(list: &ContractList, colour: bool) {
    let records = list.store().records();
    println!("Status");
    for status in Status::ALL {
        let n = records.iter().filter(|r| r.status == status).count();
        println!(
            "  {} {n}",
            pad_painted(status.as_str(), 26, status.tone(), colour)
        );
    }
    println!();
    println!("Risk Level");
    for risk in Risk::ALL {
        let n = records.iter().filter(|r| r.risk == risk).count();
        println!(
            "  {} {n}",
            pad_painted(risk.as_str(), 26, risk.tone(), colour)
        );
    }
}

/// Selected facet values in display order, unrecognised ones quoted.
fn filter_labels(filters: &FilterState) -> Vec<String> {
    let mut labels: Vec<String> = filters.status.selected().map(|s| s.to_string()).collect();
    labels.extend(filters.status.unrecognised().map(|v| format!("{v:?}")));
    labels.extend(filters.risk.selected().map(|r| format!("{r} Risk")));
    labels.extend(filters.risk.unrecognised().map(|v| format!("{v:?}")));
    labels
}

// ── Card ──

/// Print a single contract as a vertical card.
pub fn print_contract_card(record: &ContractRecord, colour: bool) {
    println!("=== {} ===", record.name);
    println!(
        "{} {}   {} Risk",
        record.status.icon(),
        paint(record.status.as_str(), record.status.tone(), colour),
        paint(record.risk.as_str(), record.risk.tone(), colour),
    );
    println!();

    println!("Overview");
    println!("  {:<26} {}", "id", record.id);
    println!("  {:<26} {}", "parties", record.parties);
    println!("  {:<26} {}", "start", record.start);
    println!("  {:<26} {}", "expiry", record.expiry);
    println!();

    if !record.clauses.is_empty() {
        println!("Clauses ({})", record.clauses.len());
        for clause in record.clauses.iter().take(MAX_LIST_ITEMS) {
            println!(
                "  {:<40} {} {:>4}",
                truncate(&clause.title, 40),
                bar(clause.confidence),
                percent(clause.confidence)
            );
            println!("    {}", clause.summary);
        }
        more(record.clauses.len());
        println!();
    }

    if !record.insights.is_empty() {
        println!("Insights ({})", record.insights.len());
        for insight in record.insights.iter().take(MAX_LIST_ITEMS) {
            let label = format!("{} Risk", insight.risk);
            println!(
                "  {}  {}",
                pad_painted(&label, 11, insight.risk.tone(), colour),
                insight.message
            );
        }
        more(record.insights.len());
        println!();
    }

    if !record.evidence.is_empty() {
        println!("Evidence ({})", record.evidence.len());
        for (i, ev) in record.evidence.iter().take(MAX_LIST_ITEMS).enumerate() {
            println!(
                "  [{}] {:<30} {} {:>4}",
                i + 1,
                truncate(&ev.source, 30),
                bar(ev.relevance),
                percent(ev.relevance)
            );
            println!("      {}", truncate(&ev.snippet, 70));
        }
        more(record.evidence.len());
        println!();
    }
}

/// Print one evidence item in full.
pub fn print_evidence_detail(index: usize, evidence: &Evidence) {
    println!("Evidence [{index}]");
    println!("  {:<26} {}", "source", evidence.source);
    println!(
        "  {:<26} {} {}",
        "relevance",
        bar(evidence.relevance),
        percent(evidence.relevance)
    );
    println!();
    println!("  \"{}\"", evidence.snippet);
}

// ── Uploads ──

pub fn print_upload_queue(queue: &UploadQueue) {
    for entry in queue.entries() {
        let mark = match &entry.status {
            UploadStatus::Success(_) => "ok ",
            UploadStatus::Error(_) => "ERR",
            UploadStatus::Pending | UploadStatus::Uploading => "...",
        };
        println!(
            "  [{mark}] {:<40} {:>10}  {}",
            truncate(&entry.file.name, 40),
            format_file_size(entry.file.size),
            entry.status.label()
        );
    }
    println!(
        "{} uploaded, {} failed",
        queue.succeeded(),
        queue.failed()
    );
}

// ── Helpers ──

fn more(len: usize) {
    if len > MAX_LIST_ITEMS {
        println!("  ... and {} more", len - MAX_LIST_ITEMS);
    }
}

/// A fixed-width meter for a `[0, 1]` score.
fn bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Pad before painting so escape codes don't skew column widths.
fn pad_painted(text: &str, width: usize, tone: clausewise_core::badge::Tone, colour: bool) -> String {
    paint(&format!("{text:<width$}"), tone, colour)
}

/// Cut `s` to at most `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Société Générale & Co", 10), "Société...");
    }

    #[test]
    fn bar_scales_with_score() {
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(bar(1.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn filter_labels_list_selected_values() {
        let mut filters = FilterState::new();
        filters.risk.toggle(Risk::High);
        filters.status.toggle(Status::Expired);
        filters.status.toggle(Status::Active);
        filters.risk.toggle_raw("Critical");
        assert_eq!(
            filter_labels(&filters),
            vec!["Active", "Expired", "High Risk", "\"Critical\""]
        );
    }

    #[test]
    fn padding_happens_inside_colour() {
        let painted = pad_painted("Low", 6, Risk::Low.tone(), true);
        assert!(painted.contains("Low   "));
        assert!(painted.starts_with('\x1b'));
    }
}
