// Results formatting and reporting

use crate::benchmarks::summary::{fastest_per_condition, format_duration};
use crate::benchmarks::ResultCollection;
use crate::conditions::Condition;
use crate::grid::Grid;
use colored::*;
use std::time::Duration;

pub struct Reporter;

impl Reporter {
    pub fn print_header(title: &str) {
        let width = 80;
        println!("{}", "=".repeat(width).bright_blue());
        println!("{:^width$}", title.bright_white().bold(), width = width);
        println!("{}", "=".repeat(width).bright_blue());
        println!();
    }

    pub fn print_separator() {
        println!("{}", "-".repeat(80).blue());
    }

    pub fn print_conditions(conditions: &[Condition]) {
        let listed: Vec<String> = conditions.iter().map(Condition::to_string).collect();
        println!("{} [{}]", "conditions:".bright_white().bold(), listed.join(", "));
    }

    /// Every row of every candidate, with the per-call time alongside the
    /// batch total
    pub fn print_results(results: &ResultCollection, number: usize) {
        Self::print_header("Timing Results");

        for (label, rows) in results {
            println!("{} {}", "▶".cyan().bold(), label.bright_white());
            println!(
                "  {:<30} {:>15} {:>15}",
                "Condition".bright_white().bold(),
                "Total".bright_white().bold(),
                "Per call".bright_white().bold()
            );
            for row in rows {
                let per_call = Duration::from_secs_f64(row.seconds() / number.max(1) as f64);
                println!(
                    "  {:<30} {:>15} {:>15}",
                    row.condition.to_string(),
                    format_duration(row.elapsed).yellow(),
                    format_duration(per_call).green()
                );
            }
            Self::print_separator();
        }
    }

    pub fn print_summary(results: &ResultCollection) {
        let summaries = fastest_per_condition(results);
        if summaries.is_empty() || results.len() < 2 {
            return;
        }

        println!();
        Self::print_header("Fastest Per Condition");
        println!(
            "{:<20} {:<35} {:>15} {:>8}",
            "Condition".bright_white().bold(),
            "Fastest".bright_white().bold(),
            "Time".bright_white().bold(),
            "Speedup".bright_white().bold()
        );
        Self::print_separator();

        let mut wins: Vec<(String, usize)> = Vec::new();
        for summary in &summaries {
            println!(
                "{:<20} {:<35} {:>15} {:>8}",
                summary.condition.to_string(),
                summary.fastest.bright_white(),
                format_duration(summary.fastest_time).yellow(),
                format!("{:.2}x", summary.speedup()).bright_green().bold()
            );
            match wins.iter_mut().find(|(label, _)| *label == summary.fastest) {
                Some((_, count)) => *count += 1,
                None => wins.push((summary.fastest.clone(), 1)),
            }
        }

        println!();
        for (label, count) in wins {
            println!("{} fastest in {} of {} conditions", label.bright_white().bold(), count, summaries.len());
        }
    }

    /// Grid as a table: one line per outer-axis value, one column per
    /// inner-axis value
    pub fn print_grid(label: &str, grid: &Grid) {
        Self::print_header(label);
        let (x_axis, y_axis) = grid.axes();

        let mut header = format!("{:>12}", format!("[{}] \\ [{}]", x_axis, y_axis));
        for y in grid.ys() {
            header.push_str(&format!(" {:>12}", y));
        }
        println!("{}", header.bright_white().bold());
        Self::print_separator();

        for (x, row) in grid.xs().iter().zip(grid.rows()) {
            let cells: Vec<String> = row
                .iter()
                .map(|&seconds| format!(" {:>12}", format_duration(Duration::from_secs_f64(seconds))))
                .collect();
            println!("{:>12}{}", x.to_string().cyan(), cells.concat().yellow());
        }
        println!();
    }

    pub fn print_error(error: &dyn std::error::Error) {
        eprintln!("{} {}", "✗".red().bold(), error.to_string().red());
    }
}
