use csv_lens_core::{BarChart, FrequencyResult, HistogramBin, Summary, TablePreview};

pub fn print_summary(summary: &Summary) {
    for entry in summary {
        println!("{:<40} {}", entry.label, entry.value);
    }
}

pub fn print_frequency(freq: &FrequencyResult) {
    if freq.top_values.is_empty() {
        return;
    }
    println!();
    println!("{:<24} {:>10} {:>12}", "Value", "Occurrence", "Percentage");
    for e in &freq.top_values {
        println!("{:<24} {:>10} {:>11.2}%", e.value, e.occurrence, e.percentage);
    }
}

fn bar(count: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((count as f64 / max as f64) * width as f64).round() as usize;
    "#".repeat(len.max(if count > 0 { 1 } else { 0 }))
}

pub fn print_histogram(bins: &[HistogramBin], width: usize) {
    if bins.is_empty() {
        return;
    }
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
    println!();
    for b in bins {
        println!(
            "[{:>12.4}, {:>12.4}) {:>8} {}",
            b.range_start,
            b.range_end,
            b.count,
            bar(b.count, max, width)
        );
    }
}

pub fn print_bar_chart(chart: &BarChart, width: usize) {
    if chart.bars.is_empty() {
        return;
    }
    let max = chart.bars.iter().map(|b| b.occurrence).max().unwrap_or(0);
    println!();
    println!("{:<24} {:>10}", chart.axis, "occurrence");
    for b in &chart.bars {
        println!(
            "{:<24} {:>10} {}",
            b.value,
            b.occurrence,
            bar(b.occurrence, max, width)
        );
    }
}

pub fn print_preview(view: &TablePreview) {
    println!("{}", view.columns.join(" | "));
    for row in &view.rows {
        println!("{}", row.join(" | "));
    }
}
