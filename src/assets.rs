//! Sprite loading and the per-session asset table.
//!
//! Sprites are glyph art with a world-unit size. They come either from the
//! built-in catalogue or, when a data directory is configured, from
//! `<data_dir>/<name>.txt` files whose first line is `<width> <height>`.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::entities::EntityKind;
use crate::geometry::Rect;

/// Balloon counts the player can be drawn with.
pub const PLAYER_BALLOON_STATES: usize = 4;
/// Frames in one flap animation cycle.
pub const PLAYER_FRAMES: usize = 5;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot load asset `{name}`: not found in {location}")]
    Missing { name: String, location: String },
    #[error("asset `{name}` is malformed: {reason}")]
    Malformed { name: String, reason: String },
    #[error("failed to read asset `{name}`")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub rows: Vec<String>,
    pub width: f64,
    pub height: f64,
}

impl Sprite {
    fn new(name: &str, rows: &[&str], width: f64, height: f64) -> Self {
        Sprite {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            width,
            height,
        }
    }

    /// Bounding rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Horizontally flipped copy of the glyph art.
    pub fn mirrored(&self) -> Sprite {
        let rows = self
            .rows
            .iter()
            .map(|row| row.chars().rev().map(mirror_glyph).collect())
            .collect();
        Sprite {
            rows,
            ..self.clone()
        }
    }
}

fn mirror_glyph(c: char) -> char {
    match c {
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '/' => '\\',
        '\\' => '/',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        other => other,
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct AssetLoader {
    data_dir: Option<PathBuf>,
}

impl AssetLoader {
    /// Resolve every name from the built-in catalogue.
    pub fn builtin() -> Self {
        AssetLoader { data_dir: None }
    }

    /// Resolve every name from `<dir>/<name>.txt`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        AssetLoader {
            data_dir: Some(dir.into()),
        }
    }

    pub fn load(&self, name: &str) -> Result<(Sprite, Rect), AssetError> {
        let sprite = match &self.data_dir {
            Some(dir) => load_from_dir(dir, name)?,
            None => builtin(name).ok_or_else(|| AssetError::Missing {
                name: name.to_string(),
                location: "built-in catalogue".to_string(),
            })?,
        };
        debug!(asset = name, width = sprite.width, height = sprite.height, "Loaded sprite");
        let rect = sprite.rect();
        Ok((sprite, rect))
    }
}

fn load_from_dir(dir: &Path, name: &str) -> Result<Sprite, AssetError> {
    let path = dir.join(format!("{name}.txt"));
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AssetError::Missing {
                name: name.to_string(),
                location: dir.display().to_string(),
            })
        }
        Err(source) => {
            return Err(AssetError::Io {
                name: name.to_string(),
                source,
            })
        }
    };
    parse_sprite(name, &text)
}

/// Parse the `<width> <height>` header followed by glyph rows.
pub fn parse_sprite(name: &str, text: &str) -> Result<Sprite, AssetError> {
    let malformed = |reason: &str| AssetError::Malformed {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut lines = text.lines();
    let header = lines.next().ok_or_else(|| malformed("empty file"))?;
    let dims: Vec<f64> = header
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed("header must be `<width> <height>`"))?;
    let &[width, height] = dims.as_slice() else {
        return Err(malformed("header must be `<width> <height>`"));
    };
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(malformed("size must be non-negative"));
    }

    let rows: Vec<String> = lines.map(|l| l.trim_end().to_string()).collect();
    if rows.is_empty() {
        return Err(malformed("no glyph rows"));
    }

    Ok(Sprite {
        name: name.to_string(),
        rows,
        width,
        height,
    })
}

// ── Built-in catalogue ────────────────────────────────────────────────────────

const PLAYER_WIDTH: f64 = 60.0;
const PLAYER_HEIGHT: f64 = 70.0;

fn builtin(name: &str) -> Option<Sprite> {
    let sprite = match name {
        "star" => Sprite::new(name, &["<*>"], 32.0, 32.0),
        "balloon" => Sprite::new(name, &["(@)", " | "], 30.0, 45.0),
        "whale" => Sprite::new(name, &[" .----._", "(  ~   o>", " `----'"], 150.0, 80.0),
        "water" => Sprite::new(name, &["~~~~~~~~~"], 88.0, 31.0),
        "cloud" => Sprite::new(name, &["  .--.", "(      ).", " `-----'"], 180.0, 80.0),
        "platform" => Sprite::new(name, &["[================]"], 200.0, 20.0),
        _ => return builtin_player(name),
    };
    Some(sprite)
}

/// `shrimp-<balloons>-<frame>`: balloons above, tail flicking with the frame.
fn builtin_player(name: &str) -> Option<Sprite> {
    let rest = name.strip_prefix("shrimp-")?;
    let (balloons, frame) = rest.split_once('-')?;
    let balloons: usize = balloons.parse().ok()?;
    let frame: usize = frame.parse().ok()?;
    if balloons >= PLAYER_BALLOON_STATES || frame >= PLAYER_FRAMES {
        return None;
    }

    let tops = ["     ", "  o  ", " o o ", "o o o"];
    let strings = ["     ", "  |  ", " \\|/ ", " \\|/ "];
    let tails = ["~", "=", "-", "=", "~"];
    let body = format!(" <o){}", tails[frame]);

    Some(Sprite {
        name: name.to_string(),
        rows: vec![
            tops[balloons].to_string(),
            strings[balloons].to_string(),
            body,
        ],
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
    })
}

// ── Asset table ───────────────────────────────────────────────────────────────

/// Every sprite a session needs, loaded once up front.
#[derive(Clone, Debug)]
pub struct AssetTable {
    sprites: HashMap<EntityKind, Sprite>,
    /// Indexed `[balloons][frame]`.
    player: Vec<Vec<Sprite>>,
}

impl AssetTable {
    pub fn load(loader: &AssetLoader) -> Result<Self, AssetError> {
        let mut sprites = HashMap::new();
        for kind in EntityKind::ALL {
            let (sprite, _) = loader.load(kind.asset_name())?;
            sprites.insert(kind, sprite);
        }

        let mut player = Vec::with_capacity(PLAYER_BALLOON_STATES);
        for balloons in 0..PLAYER_BALLOON_STATES {
            let mut frames = Vec::with_capacity(PLAYER_FRAMES);
            for frame in 0..PLAYER_FRAMES {
                let (sprite, _) = loader.load(&format!("shrimp-{balloons}-{frame}"))?;
                frames.push(sprite);
            }
            player.push(frames);
        }

        Ok(AssetTable { sprites, player })
    }

    pub fn sprite(&self, kind: EntityKind) -> &Sprite {
        // Every kind is inserted by `load`.
        &self.sprites[&kind]
    }

    pub fn size(&self, kind: EntityKind) -> (f64, f64) {
        let s = self.sprite(kind);
        (s.width, s.height)
    }

    pub fn player_frame(&self, balloons: u8, frame: usize) -> &Sprite {
        let b = (balloons as usize).min(PLAYER_BALLOON_STATES - 1);
        &self.player[b][frame % PLAYER_FRAMES]
    }

    /// Size of the full-health idle frame, used for the player's rectangle.
    pub fn player_size(&self) -> (f64, f64) {
        let s = self.player_frame(3, 0);
        (s.width, s.height)
    }
}
