use folio_chat_core::Snapshot;
use owo_colors::OwoColorize;

/// Prints the chip rail as a numbered list.
pub fn chips(snapshot: &Snapshot) {
    let line = snapshot
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} {}", format!("[{}]", i + 1).dimmed(), label))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{} {}", format!("({})", snapshot.topic).dimmed(), line);
}

pub fn draft(snapshot: &Snapshot) {
    println!(
        "{} {} {}",
        "✎ draft:".dimmed(),
        snapshot.draft.bright_white(),
        "(press Enter to send)".dimmed()
    );
}

pub fn ideas(ideas: &[String]) {
    if ideas.is_empty() {
        println!("{}", "No ideas right now.".dimmed());
        return;
    }
    for idea in ideas {
        println!("{} {}", "💡".bright_yellow(), idea);
    }
}

/// Renders `**bold**` spans with terminal bold.
pub fn markdown_bold(text: &str) -> String {
    let parts: Vec<_> = text.split("**").collect();
    // An unpaired marker is kept as is.
    let paired = parts.len() % 2 == 1;

    let mut out = String::with_capacity(text.len());
    for (i, part) in parts.iter().enumerate() {
        let last = i == parts.len() - 1;
        if i % 2 == 1 && !(last && !paired) {
            out.push_str(&part.bold().to_string());
        } else {
            if i % 2 == 1 {
                out.push_str("**");
            }
            out.push_str(part);
        }
    }
    out
}
