use std::path::PathBuf;

use bb_app::SizeF;
use bb_hanzi::{ChineseVariant, ToneStyle};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "biangbiang", version, about = "Read Chinese: Hanzi to Pinyin with translation")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert text to Pinyin and translate it.
    Text(TextArgs),
    /// Follow the clipboard and convert whatever Chinese text is copied.
    Watch(WatchArgs),
    /// Recognize Hanzi in an image file.
    Scan(ScanArgs),
    /// Recognize Hanzi on the screen, continuously.
    Live(LiveArgs),
    /// Show or change persisted settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Options shared by the commands that produce Pinyin and translations.
#[derive(Debug, Clone, Default, Args)]
pub struct ConversionArgs {
    #[arg(long, value_parser = parse_tone)]
    pub tone: Option<ToneStyle>,
    /// Source character set for translation.
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<ChineseVariant>,
    /// Translation target language (e.g. `it`, `de_DE`).
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub no_translate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyField {
    Pinyin,
    Translation,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Text to convert; read from stdin when omitted.
    pub text: Option<String>,
    /// Read the text from the clipboard.
    #[arg(long, conflicts_with = "text")]
    pub paste: bool,
    #[command(flatten)]
    pub conversion: ConversionArgs,
    /// Also show the input converted to this character set.
    #[arg(long = "to", value_name = "VARIANT", value_parser = parse_variant)]
    pub to: Option<ChineseVariant>,
    /// Copy a result field to the clipboard.
    #[arg(long, value_enum)]
    pub copy: Option<CopyField>,
    /// With `--copy` on X11/Wayland, keep serving the clipboard for up to
    /// this many seconds before exiting (0 disables).
    #[arg(long, value_name = "SECS", default_value_t = 10, requires = "copy")]
    pub hold_secs: u64,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub conversion: ConversionArgs,
    /// Clipboard polling interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub poll_ms: u64,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    pub image: PathBuf,
    /// Show Hanzi instead of Pinyin.
    #[arg(long)]
    pub hanzi: bool,
    /// Write the overlay composed over the image as PNG.
    #[arg(long, value_name = "OUT.png")]
    pub render: Option<PathBuf>,
    /// Tap the overlay at image coordinates and copy that box.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub tap: Option<(f32, f32)>,
    /// Run the recognized lines through text mode.
    #[arg(long)]
    pub lines: bool,
    #[command(flatten)]
    pub conversion: ConversionArgs,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LiveArgs {
    /// Show Hanzi instead of Pinyin.
    #[arg(long)]
    pub hanzi: bool,
    /// Also print the overlay layout for a view of this size.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub view: Option<SizeF>,
    /// Override the minimum time between analysed frames.
    #[arg(long)]
    pub interval_ms: Option<u64>,
    #[arg(long, value_parser = parse_tone)]
    pub tone: Option<ToneStyle>,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print current settings as JSON.
    Show,
    /// Set one value, e.g. `set tone_style numbers`.
    Set { key: String, value: String },
    /// Print the settings file location.
    Path,
}

fn parse_tone(s: &str) -> Result<ToneStyle, String> {
    s.parse()
}

fn parse_variant(s: &str) -> Result<ChineseVariant, String> {
    s.parse().map_err(|e: bb_hanzi::VariantError| e.to_string())
}

pub fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

pub fn parse_size(s: &str) -> Result<SizeF, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w = w.trim().parse::<f32>().map_err(|e| format!("bad width: {e}"))?;
    let h = h.trim().parse::<f32>().map_err(|e| format!("bad height: {e}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("size must be positive, got '{s}'"));
    }
    Ok(SizeF::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_text_command() {
        let cli = Cli::try_parse_from([
            "biangbiang", "-vv", "text", "你好", "--tone", "numbers", "--variant", "zh-Hant",
            "--copy", "pinyin", "--to", "traditional", "--hold-secs", "3",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Text(args) = cli.command else {
            panic!("expected text command");
        };
        assert_eq!(args.text.as_deref(), Some("你好"));
        assert_eq!(args.conversion.tone, Some(ToneStyle::Numbers));
        assert_eq!(args.conversion.variant, Some(ChineseVariant::Traditional));
        assert_eq!(args.copy, Some(CopyField::Pinyin));
        assert_eq!(args.to, Some(ChineseVariant::Traditional));
        assert_eq!(args.hold_secs, 3);
    }

    #[test]
    fn paste_conflicts_with_text() {
        assert!(Cli::try_parse_from(["biangbiang", "text", "你好", "--paste"]).is_err());
    }

    #[test]
    fn points_and_sizes() {
        assert_eq!(parse_point("10, 20.5"), Ok((10.0, 20.5)));
        assert!(parse_point("10").is_err());
        assert_eq!(parse_size("1080x1920"), Ok(SizeF::new(1080.0, 1920.0)));
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("big").is_err());
    }
}
