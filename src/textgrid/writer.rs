/*!
 * TextGrid writer for Praat's long and short text layouts.
 */

use std::fmt::Write;

use super::model::{Interval, TextGrid, Tier};
use super::{OutputFormat, WriteOptions};

/// Shortest decimal that reads back to the same value (`0`, `1.5`, `0.125`)
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid writing "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// Quote a string, doubling embedded quotes
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Render a TextGrid in the requested layout
pub fn render(tg: &TextGrid, options: &WriteOptions) -> String {
    let tiers: Vec<RenderedTier> = tg
        .tiers
        .iter()
        .map(|tier| RenderedTier::from_tier(tier, options.include_blank_spaces))
        .collect();

    match options.format {
        OutputFormat::Long => render_long(tg, &tiers),
        OutputFormat::Short => render_short(tg, &tiers),
    }
}

enum RenderedEntries {
    Intervals(Vec<Interval>),
    Points(Vec<(f64, String)>),
}

struct RenderedTier<'a> {
    class: &'static str,
    name: &'a str,
    min_time: f64,
    max_time: f64,
    entries: RenderedEntries,
}

impl<'a> RenderedTier<'a> {
    fn from_tier(tier: &'a Tier, include_blank_spaces: bool) -> Self {
        let entries = match tier {
            Tier::Interval(t) if include_blank_spaces => RenderedEntries::Intervals(t.with_blank_spaces()),
            Tier::Interval(t) => RenderedEntries::Intervals(t.entries.clone()),
            Tier::Point(t) => RenderedEntries::Points(
                t.entries.iter().map(|p| (p.time, p.label.clone())).collect(),
            ),
        };

        Self {
            class: tier.class_name(),
            name: tier.name(),
            min_time: tier.min_time(),
            max_time: tier.max_time(),
            entries,
        }
    }

    fn len(&self) -> usize {
        match &self.entries {
            RenderedEntries::Intervals(entries) => entries.len(),
            RenderedEntries::Points(entries) => entries.len(),
        }
    }
}

fn header(out: &mut String) {
    out.push_str("File type = \"ooTextFile\"\n");
    out.push_str("Object class = \"TextGrid\"\n\n");
}

// Writing into a String never fails, so the fmt results are ignored below
fn render_long(tg: &TextGrid, tiers: &[RenderedTier]) -> String {
    let mut out = String::new();
    header(&mut out);

    let _ = writeln!(out, "xmin = {} ", format_number(tg.xmin));
    let _ = writeln!(out, "xmax = {} ", format_number(tg.xmax));
    if tiers.is_empty() {
        out.push_str("tiers? <absent> \n");
        return out;
    }
    out.push_str("tiers? <exists> \n");
    let _ = writeln!(out, "size = {} ", tiers.len());
    out.push_str("item []: \n");

    for (i, tier) in tiers.iter().enumerate() {
        let _ = writeln!(out, "    item [{}]:", i + 1);
        let _ = writeln!(out, "        class = {} ", quote(tier.class));
        let _ = writeln!(out, "        name = {} ", quote(tier.name));
        let _ = writeln!(out, "        xmin = {} ", format_number(tier.min_time));
        let _ = writeln!(out, "        xmax = {} ", format_number(tier.max_time));

        match &tier.entries {
            RenderedEntries::Intervals(entries) => {
                let _ = writeln!(out, "        intervals: size = {} ", tier.len());
                for (k, interval) in entries.iter().enumerate() {
                    let _ = writeln!(out, "        intervals [{}]:", k + 1);
                    let _ = writeln!(out, "            xmin = {} ", format_number(interval.start));
                    let _ = writeln!(out, "            xmax = {} ", format_number(interval.end));
                    let _ = writeln!(out, "            text = {} ", quote(&interval.label));
                }
            }
            RenderedEntries::Points(entries) => {
                let _ = writeln!(out, "        points: size = {} ", tier.len());
                for (k, (time, label)) in entries.iter().enumerate() {
                    let _ = writeln!(out, "        points [{}]:", k + 1);
                    let _ = writeln!(out, "            number = {} ", format_number(*time));
                    let _ = writeln!(out, "            mark = {} ", quote(label));
                }
            }
        }
    }

    out
}

fn render_short(tg: &TextGrid, tiers: &[RenderedTier]) -> String {
    let mut out = String::new();
    header(&mut out);

    let _ = writeln!(out, "{}", format_number(tg.xmin));
    let _ = writeln!(out, "{}", format_number(tg.xmax));
    if tiers.is_empty() {
        out.push_str("<absent>\n");
        return out;
    }
    out.push_str("<exists>\n");
    let _ = writeln!(out, "{}", tiers.len());

    for tier in tiers {
        let _ = writeln!(out, "{}", quote(tier.class));
        let _ = writeln!(out, "{}", quote(tier.name));
        let _ = writeln!(out, "{}", format_number(tier.min_time));
        let _ = writeln!(out, "{}", format_number(tier.max_time));
        let _ = writeln!(out, "{}", tier.len());

        match &tier.entries {
            RenderedEntries::Intervals(entries) => {
                for interval in entries {
                    let _ = writeln!(out, "{}", format_number(interval.start));
                    let _ = writeln!(out, "{}", format_number(interval.end));
                    let _ = writeln!(out, "{}", quote(&interval.label));
                }
            }
            RenderedEntries::Points(entries) => {
                for (time, label) in entries {
                    let _ = writeln!(out, "{}", format_number(*time));
                    let _ = writeln!(out, "{}", quote(label));
                }
            }
        }
    }

    out
}
