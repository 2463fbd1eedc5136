use console::{style, Key, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

const INK: u8 = 109;    // muted teal
const RULE: u8 = 66;
const FAINT: u8 = 243;

const TAGLINE: &str = "Agentic AI SEC Filing Analysis";

const DISCLAIMER: [&str; 2] = [
    "Reports are written by a language model from public SEC filings.",
    "They can be incomplete or wrong. Not investment advice.",
];

const QUICK_START: [(&str, &str); 3] = [
    ("/analyze AAPL 10-K", "generate a report"),
    ("What were the total revenues?", "ask about it"),
    ("/export", "save it as JSON"),
];

/// Left padding that centers `width` columns in a terminal `cols` wide.
fn indent(cols: usize, width: usize) -> String {
    " ".repeat(cols.saturating_sub(width) / 2)
}

/// Splash screen shown once when the REPL starts. Returns after Enter.
pub fn show_splash(base_url: &str) {
    let term = Term::stdout();
    let cols = term.size().1 as usize;
    let _ = term.clear_screen();

    let palette = Palette::from_hex(&["#87D7D7", "#5FAFAF", "#5F8787"]);
    let art = Banner::new("FILING LENS").map(|banner| {
        banner
            .gradient(Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal))
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .color_mode(ColorMode::TrueColor)
            .width(cols)
            .render()
    });
    println!();
    match art {
        Ok(art) => print!("{}", art),
        // No FIGlet font; plain title instead
        Err(_) => println!("{}{}", indent(cols, 11), style("FILING LENS").color256(INK).bold()),
    }

    let build = format!(
        "v{} ({})  {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_HASH").unwrap_or("dev"),
        TAGLINE,
    );
    println!("{}{}", indent(cols, build.chars().count()), style(&build).color256(FAINT));
    println!();

    print_disclaimer(cols);
    println!();

    let backend = format!("backend  {}", base_url);
    println!("{}{}", indent(cols, backend.len()), style(backend).color256(INK));
    println!();

    let pad = indent(cols, 56);
    for (input, what) in QUICK_START {
        println!("{}{:<34}{}", pad, style(input).white().bold(), style(what).dim());
    }
    println!();
    println!("{}{}", indent(cols, 22), style("press Enter to begin").dim());

    while !matches!(term.read_key(), Ok(Key::Enter) | Ok(Key::Escape) | Err(_)) {}

    let _ = term.clear_screen();
    println!(
        "  {} {}  {}",
        style("filing-lens").color256(INK).bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style("/help for commands").dim(),
    );
    println!();
}

fn print_disclaimer(cols: usize) {
    let inner = DISCLAIMER.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let pad = indent(cols, inner + 2);
    let line = "\u{2500}".repeat(inner);

    println!("{}{}", pad, style(format!("\u{256d}{}\u{256e}", line)).color256(RULE));
    for text in DISCLAIMER {
        let fill = " ".repeat(inner - 1 - text.chars().count());
        println!(
            "{}{} {}{}{}",
            pad,
            style("\u{2502}").color256(RULE),
            style(text).color256(FAINT),
            fill,
            style("\u{2502}").color256(RULE),
        );
    }
    println!("{}{}", pad, style(format!("\u{2570}{}\u{256f}", line)).color256(RULE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_centers_and_saturates() {
        assert_eq!(indent(20, 10), "     ");
        assert_eq!(indent(5, 10), "");
    }
}
