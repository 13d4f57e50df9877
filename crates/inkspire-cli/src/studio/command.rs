//! Studio shell input parsing.
//!
//! Lines starting with `/` are commands; anything else is a tattoo
//! description to generate.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use inkspire_core::TattooStyle;
use inkspire_core::presentation::ViewMode;
use inkspire_core::tryon::{BlendMode, ContainerRect};

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/login", "/signup", "/logout", "/style", "/styles", "/ref", "/history", "/view", "/save",
    "/print", "/tryon", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq)]
pub enum TryOnAction {
    Photo(PathBuf),
    Clear,
    Move { x: f64, y: f64 },
    Nudge { dx: f64, dy: f64 },
    /// Pointer drag inside a container, all in screen pixels
    Drag { x: f64, y: f64, rect: ContainerRect },
    Scale(f64),
    Opacity(f64),
    Blend(BlendMode),
    Show,
    Export,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Login { email: String },
    SignUp { email: String, name: String },
    Logout,
    /// `None` shows the current style
    Style(Option<TattooStyle>),
    Styles,
    Reference(PathBuf),
    ClearReference,
    ShowReference,
    History,
    View { position: usize, mode: ViewMode },
    /// `images` selects what to write; `Split` writes both.
    Save { position: usize, images: ViewMode },
    Print { position: usize },
    TryOn { position: usize, action: TryOnAction },
    Help,
    Quit,
    Generate(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Generate(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };
        let words: Vec<&str> = args.split_whitespace().collect();

        match name {
            "login" => Ok(Self::Login {
                email: single(&words, "/login <email>")?.to_string(),
            }),
            "signup" => match words.split_first() {
                Some((email, name)) if !name.is_empty() => Ok(Self::SignUp {
                    email: email.to_string(),
                    name: name.join(" "),
                }),
                _ => bail!("Usage: /signup <email> <studio or artist name>"),
            },
            "logout" => Ok(Self::Logout),
            "style" if args.is_empty() => Ok(Self::Style(None)),
            "style" => Ok(Self::Style(Some(args.parse()?))),
            "styles" => Ok(Self::Styles),
            "ref" => match args {
                "" => Ok(Self::ShowReference),
                "clear" => Ok(Self::ClearReference),
                path => Ok(Self::Reference(PathBuf::from(path))),
            },
            "history" => Ok(Self::History),
            "view" => match words.as_slice() {
                [position, mode] => Ok(Self::View {
                    position: parse_position(position)?,
                    mode: mode.parse()?,
                }),
                _ => bail!("Usage: /view <n> <color|stencil|split>"),
            },
            "save" => match words.as_slice() {
                [position] => Ok(Self::Save {
                    position: parse_position(position)?,
                    images: ViewMode::Split,
                }),
                [position, images] => Ok(Self::Save {
                    position: parse_position(position)?,
                    images: images.parse()?,
                }),
                _ => bail!("Usage: /save <n> [color|stencil]"),
            },
            "print" => Ok(Self::Print {
                position: parse_position(single(&words, "/print <n>")?)?,
            }),
            "tryon" => parse_try_on(&words),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(anyhow!("Unknown command '/{other}'. Type /help.")),
        }
    }
}

fn single<'a>(words: &[&'a str], usage: &str) -> Result<&'a str> {
    match words {
        [word] => Ok(*word),
        _ => bail!("Usage: {usage}"),
    }
}

fn parse_position(word: &str) -> Result<usize> {
    match word.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => bail!("'{word}' is not a result number (1, 2, ...)"),
    }
}

fn number(word: &str) -> Result<f64> {
    word.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .with_context(|| format!("'{word}' is not a number"))
}

const TRY_ON_USAGE: &str = "Usage: /tryon <n> photo <path> | clear | move <x> <y> | nudge <dx> <dy> \
| drag <x> <y> <left> <top> <width> <height> | scale <5-80> | opacity <0.1-1> \
| blend <multiply|normal|darken|overlay> | show | export";

fn parse_try_on(words: &[&str]) -> Result<ShellCommand> {
    let Some((position, rest)) = words.split_first() else {
        bail!(TRY_ON_USAGE);
    };
    let position = parse_position(position)?;

    let action = match rest {
        [] | ["show"] => TryOnAction::Show,
        ["photo", path @ ..] if !path.is_empty() => TryOnAction::Photo(PathBuf::from(path.join(" "))),
        ["clear"] => TryOnAction::Clear,
        ["move", x, y] => TryOnAction::Move {
            x: number(x)?,
            y: number(y)?,
        },
        ["nudge", dx, dy] => TryOnAction::Nudge {
            dx: number(dx)?,
            dy: number(dy)?,
        },
        ["drag", x, y, left, top, width, height] => TryOnAction::Drag {
            x: number(x)?,
            y: number(y)?,
            rect: ContainerRect {
                left: number(left)?,
                top: number(top)?,
                width: number(width)?,
                height: number(height)?,
            },
        },
        ["scale", value] => TryOnAction::Scale(number(value)?),
        ["opacity", value] => TryOnAction::Opacity(number(value)?),
        ["blend", mode] => TryOnAction::Blend(mode.parse()?),
        ["export"] => TryOnAction::Export,
        _ => bail!(TRY_ON_USAGE),
    };

    Ok(ShellCommand::TryOn { position, action })
}
