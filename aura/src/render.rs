//! Text output for each command.

use aura_core::analytics::{
    AnalyzerRunResult, AnalyzerRunStatus, ConfidenceScore, CorrelationMatrix, DetailedStatistics,
    ForecastModel, Intervention, OutlookDay, PatternInsight,
};
use aura_core::format::{format_list, format_percent, format_relative_time, rating_bar};
use aura_core::Entry;
use chrono::Utc;

pub fn entries(entries: &[Entry]) {
    let now = Utc::now();
    for entry in entries {
        let short_id = &entry.id[..8.min(entry.id.len())];
        println!(
            "{}  {:>8}  mood {:>2}  energy {:>2}  {}",
            short_id,
            format_relative_time(entry.timestamp, now),
            entry.mood,
            entry.energy,
            entry.tags.join(", ")
        );
        if !entry.note.is_empty() {
            println!("          {}", entry.note);
        }
    }
}

pub fn statistics(stats: &DetailedStatistics) {
    println!(
        "{} entries over {} days",
        stats.entry_count, stats.time_span_days
    );
    println!();
    for (label, series) in [("Mood", &stats.mood), ("Energy", &stats.energy)] {
        println!(
            "{:<7} {}  mean {:.1}  median {:.0}  std {:.2}  range {:.0}-{:.0}",
            label,
            rating_bar(series.mean),
            series.mean,
            series.median,
            series.std_dev,
            series.min,
            series.max
        );
    }
    println!();
    println!("Longest positive streak: {}", stats.streaks.longest_positive);
    println!("Longest negative streak: {}", stats.streaks.longest_negative);
    match stats.volatility {
        Some(v) => println!("Volatility:              {:.2}", v),
        None => println!("Volatility:              -"),
    }
}

pub fn patterns(patterns: &[PatternInsight]) {
    if patterns.is_empty() {
        println!("No strong patterns detected yet.");
        return;
    }
    for p in patterns {
        println!("{} [{}] {:.1}/10", p.name, p.level.as_str(), p.strength);
        println!("  {}", p.description);
        println!("  -> {}", p.actionable);
    }
}

pub fn confidence(scores: &[ConfidenceScore]) {
    if scores.is_empty() {
        println!("No pattern is reliable enough to score yet.");
        return;
    }
    for s in scores {
        println!(
            "{}: {} ({}, {} data points, {})",
            s.pattern,
            format_percent(s.confidence),
            s.reliability.as_str(),
            s.data_points,
            s.timeframe
        );
        println!("  {}", s.description);
        for factor in &s.factors {
            println!("  - {}", factor);
        }
    }
}

pub fn forecasts(models: &[ForecastModel]) {
    if models.is_empty() {
        println!("No forecast model is accurate enough on this history yet.");
        return;
    }
    for model in models {
        println!(
            "{} ({}, {}% accuracy)",
            model.name,
            model.kind.as_str(),
            model.confidence
        );
        println!("  {}", model.description);
        for factor in &model.factors {
            println!("  - {}", factor);
        }
        for day in &model.predictions {
            println!(
                "  {} {:<9}  mood {:>4.1}  energy {:>4.1}  {:>3}%  {}",
                day.date, day.day_name, day.mood, day.energy, day.confidence, day.reasoning
            );
            if !day.risks.is_empty() {
                println!("      risks: {}", format_list(&day.risks));
            }
            if !day.opportunities.is_empty() {
                println!("      opportunities: {}", format_list(&day.opportunities));
            }
        }
        println!();
    }
}

pub fn outlook(days: &[OutlookDay]) {
    for day in days {
        println!(
            "{} {:<9}  mood {:>4.1}  energy {:>4.1}  ({}% confidence)",
            day.date, day.day_name, day.mood, day.energy, day.confidence
        );
        println!("  risks:         {}", format_list(&day.risks));
        println!("  opportunities: {}", format_list(&day.opportunities));
        println!("  suggestions:   {}", format_list(&day.suggestions));
    }
}

pub fn correlations(matrix: &CorrelationMatrix) {
    let width = matrix
        .variables
        .iter()
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    print!("{:width$}", "", width = width);
    for v in &matrix.variables {
        print!("  {:>width$}", v, width = width);
    }
    println!();
    for (name, row) in matrix.variables.iter().zip(&matrix.values) {
        print!("{:width$}", name, width = width);
        for value in row {
            print!("  {:>width$.2}", value, width = width);
        }
        println!();
    }

    println!();
    for cell in matrix.cells() {
        if cell.coefficient.abs() > 0.2 {
            println!(
                "{} ~ {}: {:+.2} ({})",
                cell.first,
                cell.second,
                cell.coefficient,
                cell.strength.as_str()
            );
        }
    }
}

pub fn interventions(suggestions: &[Intervention]) {
    let Some(first) = suggestions.first() else {
        println!("Latest mood is in line with your recent entries.");
        return;
    };
    println!(
        "Latest mood is well below your recent average of {:.1}.",
        first.baseline_mood
    );
    for s in suggestions {
        println!("  - {} ({} confidence)", s.text, s.confidence.as_str());
    }
}

pub fn run_results(results: &[AnalyzerRunResult]) {
    for result in results {
        let status_icon = match result.status {
            AnalyzerRunStatus::Success => "+",
            AnalyzerRunStatus::InsufficientData => "-",
        };
        println!(
            "[{}] {} ({} insights, {}ms)",
            status_icon,
            result.analyzer_name,
            result.insights_produced(),
            result.duration_ms
        );
        if result.status == AnalyzerRunStatus::InsufficientData {
            println!("      need more entries");
        }
        for insight in &result.insights {
            println!("      {}", insight.headline());
        }
    }
}
