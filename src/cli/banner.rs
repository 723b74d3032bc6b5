//! Startup banner.

use std::io::IsTerminal;

const SKY: &str = "\x1b[38;2;255;209;102m";
const RAMP: &str = "\x1b[38;2;72;149;239m";
const TITLE: &str = "\x1b[1;38;2;120;190;255m";
const MOTTO: &str = "\x1b[38;2;100;100;120m";
const RESET: &str = "\x1b[0m";

/// Art on the left, lettering on the right. Each side carries the colour
/// it is drawn in.
const ROWS: [(&str, &str, &str, &str); 7] = [
    (SKY, "      .-.           ", TITLE, ""),
    (SKY, "     ( o )~~        ", TITLE, " ____                           ____                   _"),
    (SKY, "      '-'           ", TITLE, "|  _ \\ __ _ _ __ ___  _ __   / ___|  ___ ___  _   _| |_"),
    (RAMP, "        ____/       ", TITLE, "| |_) / _` | '_ ` _ \\| '_ \\  \\___ \\ / __/ _ \\| | | | __|"),
    (RAMP, "    ___/            ", TITLE, "|  _ < (_| | | | | | | |_) |  ___) | (_| (_) | |_| | |_"),
    (RAMP, " __/                ", TITLE, "|_| \\_\\__,_|_| |_| |_| .__/  |____/ \\___\\___/ \\__,_|\\__|"),
    (RAMP, "/___________        ", TITLE, "                     |_|"),
];

const MOTTO_TEXT: &str = "\"Buy low, sell high, sign carefully.\"";

fn render(colour: bool) -> String {
    let paint = |code: &'static str| if colour { code } else { "" };
    let reset = paint(RESET);

    let mut out = String::from("\n");
    for (art_colour, art, text_colour, text) in ROWS {
        let line = format!("{}{art}{reset}{}{text}{reset}", paint(art_colour), paint(text_colour));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&format!("{:21}{}{}{reset}\n", "", paint(MOTTO), MOTTO_TEXT));
    out
}

/// Print the banner, in colour only when stdout is a terminal.
pub fn print_banner() {
    println!("{}", render(std::io::stdout().is_terminal()));
}
