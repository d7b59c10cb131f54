//! # chatgraph CLI
//!
//! Command-line driver for the chatgraph library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatgraph::cli::Args;
use chatgraph::prelude::*;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Configuration is validated before any archive content is read.
    if args.top == 0 {
        return Err(ChatgraphError::config("--top must be positive (got 0)"));
    }
    let classifier = build_classifier(&args)?;

    println!("📊 chatgraph v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Export:  {}", args.archive.display());
    match &classifier {
        Some(c) if c.mode() == PatternMode::Fillers => {
            println!("🔤 Tracking: builtin filler words");
        }
        Some(c) => println!("🔤 Tracking: {} phrase(s)", c.len()),
        None => {}
    }
    println!();

    println!("⏳ Opening export...");
    let archive = Archive::open(&args.archive)?;

    let discovery = chatgraph::index::discover(&archive.messages_root())?;
    for skipped in &discovery.skipped {
        eprintln!("⚠️  Skipping {}: {}", skipped.id, skipped.reason);
    }
    println!(
        "   Found {} one-to-one conversation(s)",
        discovery.conversations.len()
    );

    let read_start = Instant::now();
    let mut bundles = Vec::new();
    let mut message_count: u64 = 0;
    for conversation in discovery.conversations.into_values() {
        if !conversation.log_path.is_file() {
            eprintln!("⚠️  Skipping {}: missing messages.csv", conversation.name);
            continue;
        }
        let events = read_log(&conversation)?;
        message_count += events.len() as u64;
        bundles.extend(accumulate(conversation, &events, classifier.as_ref()));
    }
    let bundles = extend_to_horizon(bundles);
    println!(
        "   Read {} message(s) ({:.2}s)",
        message_count,
        read_start.elapsed().as_secs_f64()
    );

    let key = if classifier.is_some() {
        RankKey::Patterns
    } else {
        RankKey::Messages
    };
    let config = SelectConfig::new(args.top)
        .with_key(key)
        .with_skip(args.skip)
        .with_terms(args.users.clone());

    let selection = rank_and_select(bundles, &config);
    for warning in &selection.warnings {
        eprintln!("⚠️  {}", warning);
    }

    if args.list {
        println!();
        print_table(&selection.selected, key);
        return Ok(());
    }

    let spec = chart_spec(&selection.selected, classifier.as_ref())?;
    println!("📈 Rendering {} series...", spec.series.len());
    render_chart(&spec, &args.output)?;

    println!();
    println!("✅ Done! Chart saved to {}", args.output.display());
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Builds the classifier requested on the command line, if any.
///
/// A phrase that fails to compile is rejected here, before any log reading.
fn build_classifier(args: &Args) -> Result<Option<PatternClassifier>> {
    if args.fillers {
        Ok(Some(PatternClassifier::fillers()))
    } else if args.phrases.is_empty() {
        Ok(None)
    } else {
        PatternClassifier::phrases(&args.phrases).map(Some)
    }
}

/// Prints the ranked `name  count` table with a trailing overall total.
fn print_table(selected: &[ConversationSeries], key: RankKey) {
    let value = |bundle: &ConversationSeries| match key {
        RankKey::Messages => bundle.total(),
        RankKey::Patterns => bundle.pattern_total(),
    };

    let name_width = selected
        .iter()
        .map(|bundle| bundle.conversation.name.chars().count())
        .chain(std::iter::once("Total".len()))
        .max()
        .unwrap_or(5);

    println!("Ranked by {}:", key);
    let mut total: u64 = 0;
    for bundle in selected {
        let count = value(bundle);
        total += count;
        println!("  {:<name_width$}  {:>8}", bundle.conversation.name, count);
    }
    println!("  {:-<width$}", "", width = name_width + 10);
    println!("  {:<name_width$}  {:>8}", "Total", total);
}

/// Assembles the chart from the selected bundles.
///
/// Plain message-count rendering overlays one primary line per selected
/// conversation. Pattern rendering is single-conversation only: one line
/// per observed pattern, most frequent first.
fn chart_spec(
    selected: &[ConversationSeries],
    classifier: Option<&PatternClassifier>,
) -> Result<ChartSpec> {
    if selected.is_empty() {
        return Err(ChatgraphError::structure(
            "no one-to-one conversations with messages found",
        ));
    }

    let Some(classifier) = classifier else {
        let series = selected.iter().map(|bundle| bundle.primary.clone()).collect();
        return Ok(ChartSpec::new("Messages over time", series));
    };

    if selected.len() > 1 {
        return Err(ChatgraphError::Selection {
            selected: selected.len(),
        });
    }

    let bundle = &selected[0];
    let what = match classifier.mode() {
        PatternMode::Fillers => "Filler words",
        PatternMode::Phrases => "Phrases",
    };
    let series: Vec<Series> = bundle.patterns_by_volume().into_iter().cloned().collect();
    if series.is_empty() {
        return Err(ChatgraphError::render(format!(
            "no pattern matches in conversation '{}'",
            bundle.conversation.name
        )));
    }
    Ok(ChartSpec::new(
        format!("{} for {}", what, bundle.conversation.name),
        series,
    ))
}
