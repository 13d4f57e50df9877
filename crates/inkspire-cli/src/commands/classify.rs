use colored::Colorize;
use inkspire_core::classify;

/// Shows the two prompts and labels a description would be generated with.
pub fn run(description: &str) {
    let classification = classify(description);

    match classification.matched_part {
        Some(part) => println!("Body part: {}", part.canonical_name().bright_magenta()),
        None => println!("Body part: {}", "none".bright_black()),
    }
    println!(
        "Closure:   {}",
        if classification.closure { "yes" } else { "no" }
    );
    println!(
        "Mode:      {}",
        if classification.is_paired_view() {
            "outer/inner pair"
        } else {
            "two variations"
        }
    );

    for (index, (prompt, label)) in classification.entries().into_iter().enumerate() {
        println!();
        println!("{} {}", format!("[{}]", index + 1).bright_black(), label.bold());
        println!("    {}", prompt);
    }
}
