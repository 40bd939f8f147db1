//! Typed per-mode parameters and the projection from the superset bag.
//!
//! Each mode gets its own struct carrying only the fields it uses, with
//! defaults applied and batch sizes clamped to the documented maximums.
//! Projection never fails: anything out of bounds is clamped and reported
//! as a warning string.

use crate::mode::GeneratorMode;
use crate::params::{GeneratorParams, PoolSpec};
use crate::values::GeneratedValue;

/// Documented maximum batch sizes and bounds.
pub mod limits {
    pub const MAX_RANGE_COUNT: usize = 10_000;
    pub const MAX_LIST_COUNT: usize = 5_000;
    pub const MAX_SHUFFLE_ITEMS: usize = 10_000;
    pub const MAX_PRECISION: u32 = 10;

    pub const MIN_PASSWORD_LENGTH: usize = 4;
    pub const MAX_PASSWORD_LENGTH: usize = 128;
    pub const MAX_PASSWORD_COUNT: usize = 100;
    pub const MAX_PIN_LENGTH: usize = 64;

    pub const MAX_DICE_SIDES: u64 = 1_000;
    pub const MAX_DICE_ROLLS: usize = 2_000;
    pub const MAX_COIN_FLIPS: usize = 10_000;

    pub const MAX_LOTTERY_PICK: usize = 100;
    pub const MAX_TICKET_COUNT: usize = 5_000;
    /// Largest numeric range materialized into a ticket bag
    pub const MAX_TICKET_POOL: u64 = 100_000;

    pub const MAX_UUID_COUNT: usize = 1_000;
    pub const MAX_BYTE_LENGTH: usize = 4_096;
    pub const MAX_BLOB_COUNT: usize = 100;
    pub const MAX_COLOR_COUNT: usize = 100;
}

use limits::*;

/// Final ordering pass applied to numeric results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(raw: Option<&str>, default: SortOrder) -> SortOrder {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("asc") | Some("ascending") => SortOrder::Asc,
            Some("desc") | Some("descending") => SortOrder::Desc,
            Some("none") | Some("") => SortOrder::None,
            _ => default,
        }
    }
}

/// Output encoding of random byte blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteEncoding {
    #[default]
    Hex,
    Base64,
    Array,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeParams {
    pub min: f64,
    pub max: f64,
    /// Always positive
    pub step: f64,
    /// Display precision in decimal digits
    pub precision: u32,
    pub count: usize,
    pub unique: bool,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    /// Trimmed, non-blank items
    pub items: Vec<String>,
    /// Same length as `items` when present
    pub weights: Option<Vec<f64>>,
    pub count: usize,
    pub unique: bool,
    pub group_size: Option<usize>,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleParams {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordParams {
    pub length: usize,
    pub count: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub exclude_ambiguous: bool,
    pub exclude: String,
    pub ensure_each: bool,
    pub grouping: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinParams {
    pub length: usize,
    pub count: usize,
    pub grouping: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiceParams {
    pub sides: u64,
    pub rolls: usize,
    /// Non-blank custom faces; replaces the numeric die when present
    pub custom_faces: Option<Vec<String>>,
    pub modifier: f64,
    pub advantage: bool,
    pub disadvantage: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinParams {
    pub flips: usize,
    pub heads_label: String,
    pub tails_label: String,
}

/// An inclusive integer range with a number of distinct picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRange {
    pub min: i64,
    pub max: i64,
    pub pick: usize,
}

impl PoolRange {
    /// Number of integers in the pool.
    pub fn capacity(&self) -> u64 {
        (self.max as i128 - self.min as i128 + 1).clamp(0, u64::MAX as i128) as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LotteryParams {
    pub pool_a: PoolRange,
    /// `None` when the bonus pool is disabled
    pub pool_b: Option<PoolRange>,
    pub sort: SortOrder,
}

/// Where a fresh ticket bag comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketSource {
    Items(Vec<String>),
    Range { min: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketParams {
    /// Caller-held bag; `None` means start from the full source
    pub remaining: Option<Vec<GeneratedValue>>,
    pub source: TicketSource,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UuidParams {
    pub count: usize,
    pub hyphens: bool,
    pub uppercase: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BytesParams {
    pub length: usize,
    pub count: usize,
    pub encoding: ByteEncoding,
    pub prefix: bool,
    pub uppercase: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorParams {
    pub count: usize,
}

/// Typed parameters for exactly one mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeParams {
    Range(RangeParams),
    List(ListParams),
    Shuffle(ShuffleParams),
    Password(PasswordParams),
    Pin(PinParams),
    Dice(DiceParams),
    Coin(CoinParams),
    Lottery(LotteryParams),
    Ticket(TicketParams),
    Uuid(UuidParams),
    Bytes(BytesParams),
    Color(ColorParams),
}

impl ModeParams {
    pub fn mode(&self) -> GeneratorMode {
        match self {
            ModeParams::Range(_) => GeneratorMode::Range,
            ModeParams::List(_) => GeneratorMode::List,
            ModeParams::Shuffle(_) => GeneratorMode::Shuffle,
            ModeParams::Password(_) => GeneratorMode::Password,
            ModeParams::Pin(_) => GeneratorMode::Pin,
            ModeParams::Dice(_) => GeneratorMode::Dice,
            ModeParams::Coin(_) => GeneratorMode::Coin,
            ModeParams::Lottery(_) => GeneratorMode::Lottery,
            ModeParams::Ticket(_) => GeneratorMode::Ticket,
            ModeParams::Uuid(_) => GeneratorMode::Uuid,
            ModeParams::Bytes(_) => GeneratorMode::Bytes,
            ModeParams::Color(_) => GeneratorMode::Color,
        }
    }

    /// How many values the call asks for. A lottery counts both pools.
    pub fn requested(&self) -> usize {
        match self {
            ModeParams::Range(p) => p.count,
            ModeParams::List(p) => p.count,
            ModeParams::Shuffle(p) => p.items.len(),
            ModeParams::Password(p) => p.count,
            ModeParams::Pin(p) => p.count,
            ModeParams::Dice(p) => p.rolls,
            ModeParams::Coin(p) => p.flips,
            ModeParams::Lottery(p) => p.pool_a.pick + p.pool_b.map_or(0, |b| b.pick),
            ModeParams::Ticket(p) => p.count,
            ModeParams::Uuid(p) => p.count,
            ModeParams::Bytes(p) => p.count,
            ModeParams::Color(p) => p.count,
        }
    }
}

/// Typed parameters plus the warnings raised while normalizing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    pub params: ModeParams,
    pub warnings: Vec<String>,
}

impl GeneratorParams {
    /// Project the bag onto the typed parameters of `mode`.
    ///
    /// Fields irrelevant to `mode` are dropped. Missing or malformed fields
    /// take their defaults; out-of-bounds sizes are clamped with a warning.
    pub fn project(&self, mode: GeneratorMode) -> Projected {
        let mut warnings = Vec::new();
        let params = match mode {
            GeneratorMode::Range => ModeParams::Range(self.range_params(&mut warnings)),
            GeneratorMode::List => ModeParams::List(self.list_params(&mut warnings)),
            GeneratorMode::Shuffle => ModeParams::Shuffle(self.shuffle_params(&mut warnings)),
            GeneratorMode::Password => ModeParams::Password(self.password_params(&mut warnings)),
            GeneratorMode::Pin => ModeParams::Pin(PinParams {
                length: clamp_size(self.length, 4, 1, MAX_PIN_LENGTH, "PIN length", &mut warnings),
                count: clamp_size(self.count, 1, 1, MAX_PASSWORD_COUNT, "PIN count", &mut warnings),
                grouping: self.grouping.unwrap_or(false),
            }),
            GeneratorMode::Dice => ModeParams::Dice(self.dice_params(&mut warnings)),
            GeneratorMode::Coin => ModeParams::Coin(CoinParams {
                flips: clamp_size(self.flips, 1, 1, MAX_COIN_FLIPS, "Flips", &mut warnings),
                heads_label: label_or(self.heads_label.as_deref(), "Heads"),
                tails_label: label_or(self.tails_label.as_deref(), "Tails"),
            }),
            GeneratorMode::Lottery => ModeParams::Lottery(self.lottery_params(&mut warnings)),
            GeneratorMode::Ticket => ModeParams::Ticket(self.ticket_params(&mut warnings)),
            GeneratorMode::Uuid => ModeParams::Uuid(UuidParams {
                count: clamp_size(self.count, 1, 1, MAX_UUID_COUNT, "UUID count", &mut warnings),
                hyphens: self.uuid_hyphens.unwrap_or(true),
                uppercase: self.uuid_uppercase.unwrap_or(false),
            }),
            GeneratorMode::Bytes => ModeParams::Bytes(self.bytes_params(&mut warnings)),
            GeneratorMode::Color => ModeParams::Color(ColorParams {
                count: clamp_size(self.count, 1, 1, MAX_COLOR_COUNT, "Color count", &mut warnings),
            }),
        };
        Projected { params, warnings }
    }

    fn range_params(&self, warnings: &mut Vec<String>) -> RangeParams {
        let mut min = self.min.unwrap_or(1.0);
        let mut max = self.max.unwrap_or(100.0);
        if min > max {
            warnings.push(format!("Minimum {min} is greater than maximum {max}; swapped"));
            std::mem::swap(&mut min, &mut max);
        }

        let step = match self.step {
            Some(step) if step > 0.0 => step,
            Some(step) => {
                warnings.push(format!("Step {step} is not positive; using 1"));
                1.0
            }
            None => 1.0,
        };

        let precision = match self.precision {
            Some(p) => (p.max(0.0) as u32).min(MAX_PRECISION),
            None => decimals(step).max(decimals(min)),
        };

        RangeParams {
            min,
            max,
            step,
            precision,
            count: clamp_size(self.count, 1, 1, MAX_RANGE_COUNT, "Count", warnings),
            unique: self.unique.unwrap_or(false),
            sort: SortOrder::parse(self.sort.as_deref(), SortOrder::None),
        }
    }

    fn list_params(&self, warnings: &mut Vec<String>) -> ListParams {
        let raw_items = self.items.as_deref().unwrap_or_default();
        let (items, weights) = match self.weights.as_deref() {
            Some(weights) => {
                if weights.len() != raw_items.len() {
                    warnings.push(format!(
                        "{} weights given for {} items; missing weights count as 1",
                        weights.len(),
                        raw_items.len()
                    ));
                }
                let (items, weights): (Vec<String>, Vec<f64>) = raw_items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        let item = item.trim();
                        (!item.is_empty())
                            .then(|| (item.to_string(), weights.get(i).copied().unwrap_or(1.0)))
                    })
                    .unzip();
                (items, Some(weights))
            }
            None => (clean_items(raw_items), None),
        };

        let count = clamp_size(self.count, 1, 1, MAX_LIST_COUNT, "Pick count", warnings);
        let group_size = self
            .group_size
            .filter(|g| *g >= 1.0)
            .map(|g| (g as usize).min(count));

        ListParams {
            items,
            weights,
            count,
            unique: self.unique.unwrap_or(true),
            group_size,
            sort: SortOrder::parse(self.sort.as_deref(), SortOrder::None),
        }
    }

    fn shuffle_params(&self, warnings: &mut Vec<String>) -> ShuffleParams {
        let mut items = clean_items(self.items.as_deref().unwrap_or_default());
        if items.len() > MAX_SHUFFLE_ITEMS {
            warnings.push(format!(
                "Only the first {MAX_SHUFFLE_ITEMS} of {} items were shuffled",
                items.len()
            ));
            items.truncate(MAX_SHUFFLE_ITEMS);
        }
        ShuffleParams { items }
    }

    fn password_params(&self, warnings: &mut Vec<String>) -> PasswordParams {
        PasswordParams {
            length: clamp_size(
                self.length,
                16,
                MIN_PASSWORD_LENGTH,
                MAX_PASSWORD_LENGTH,
                "Password length",
                warnings,
            ),
            count: clamp_size(self.count, 1, 1, MAX_PASSWORD_COUNT, "Password count", warnings),
            lowercase: self.lowercase.unwrap_or(true),
            uppercase: self.uppercase.unwrap_or(true),
            digits: self.digits.unwrap_or(true),
            symbols: self.symbols.unwrap_or(true),
            exclude_ambiguous: self.exclude_ambiguous.unwrap_or(false),
            exclude: self.exclude.clone().unwrap_or_default(),
            ensure_each: self.ensure_each.unwrap_or(true),
            grouping: self.grouping.unwrap_or(false),
        }
    }

    fn dice_params(&self, warnings: &mut Vec<String>) -> DiceParams {
        let custom_faces = self
            .custom_faces
            .as_deref()
            .map(clean_items)
            .filter(|faces| !faces.is_empty());

        DiceParams {
            sides: clamp_size(self.sides, 6, 2, MAX_DICE_SIDES as usize, "Sides", warnings) as u64,
            rolls: clamp_size(self.rolls, 1, 1, MAX_DICE_ROLLS, "Rolls", warnings),
            custom_faces,
            modifier: self.dice_modifier.unwrap_or(0.0).trunc(),
            advantage: self.advantage.unwrap_or(false),
            disadvantage: self.disadvantage.unwrap_or(false),
        }
    }

    fn lottery_params(&self, warnings: &mut Vec<String>) -> LotteryParams {
        let pool_a = pool_range(self.pool_a.as_ref(), (1, 69, 5), 1, "Main pool", warnings);
        let pool_b = pool_range(self.pool_b.as_ref(), (1, 26, 1), 0, "Bonus pool", warnings);

        LotteryParams {
            pool_a,
            pool_b: (pool_b.pick > 0).then_some(pool_b),
            sort: SortOrder::parse(self.sort.as_deref(), SortOrder::Asc),
        }
    }

    fn ticket_params(&self, warnings: &mut Vec<String>) -> TicketParams {
        let items = clean_items(self.items.as_deref().unwrap_or_default());
        let source = if items.is_empty() {
            let (mut min, mut max) = (
                self.min.unwrap_or(1.0).round() as i64,
                self.max.unwrap_or(100.0).round() as i64,
            );
            if min > max {
                std::mem::swap(&mut min, &mut max);
            }
            let size = (max as i128 - min as i128 + 1) as u128;
            if size > MAX_TICKET_POOL as u128 {
                max = min + MAX_TICKET_POOL as i64 - 1;
                warnings.push(format!(
                    "Ticket range limited to {MAX_TICKET_POOL} numbers ({min} to {max})"
                ));
            }
            TicketSource::Range { min, max }
        } else {
            TicketSource::Items(items)
        };

        TicketParams {
            remaining: self
                .ticket_remaining
                .as_deref()
                .map(clean_bag)
                .filter(|bag| !bag.is_empty()),
            source,
            count: clamp_size(self.count, 1, 1, MAX_TICKET_COUNT, "Draw count", warnings),
        }
    }

    fn bytes_params(&self, warnings: &mut Vec<String>) -> BytesParams {
        let encoding = match self.byte_encoding.as_deref().map(|s| s.trim().to_lowercase()) {
            None => ByteEncoding::Hex,
            Some(raw) => match raw.as_str() {
                "hex" | "base16" => ByteEncoding::Hex,
                "base64" | "b64" => ByteEncoding::Base64,
                "array" | "bytes" | "numeric" => ByteEncoding::Array,
                other => {
                    warnings.push(format!("Unknown byte encoding '{other}'; using hex"));
                    ByteEncoding::Hex
                }
            },
        };

        BytesParams {
            length: clamp_size(self.length, 16, 1, MAX_BYTE_LENGTH, "Byte length", warnings),
            count: clamp_size(self.count, 1, 1, MAX_BLOB_COUNT, "Blob count", warnings),
            encoding,
            prefix: self.hex_prefix.unwrap_or(false),
            uppercase: self.hex_uppercase.unwrap_or(false),
        }
    }
}

/// Clamp an optional requested size into `min..=max`, warning on changes.
fn clamp_size(
    raw: Option<f64>,
    default: usize,
    min: usize,
    max: usize,
    what: &str,
    warnings: &mut Vec<String>,
) -> usize {
    let Some(requested) = raw.map(f64::trunc) else {
        return default;
    };
    if requested < min as f64 {
        warnings.push(format!("{what} {requested} raised to {min}"));
        min
    } else if requested > max as f64 {
        warnings.push(format!("{what} {requested} limited to {max}"));
        max
    } else {
        requested as usize
    }
}

fn pool_range(
    spec: Option<&PoolSpec>,
    (default_min, default_max, default_pick): (i64, i64, usize),
    min_pick: usize,
    what: &str,
    warnings: &mut Vec<String>,
) -> PoolRange {
    let spec = spec.cloned().unwrap_or_default();
    let mut min = spec.min.map(|v| v.round() as i64).unwrap_or(default_min);
    let mut max = spec.max.map(|v| v.round() as i64).unwrap_or(default_max);
    if min > max {
        warnings.push(format!("{what}: minimum {min} is greater than maximum {max}; swapped"));
        std::mem::swap(&mut min, &mut max);
    }
    let pick = clamp_size(
        spec.pick,
        default_pick,
        min_pick,
        MAX_LOTTERY_PICK,
        &format!("{what} pick"),
        warnings,
    );
    PoolRange { min, max, pick }
}

fn clean_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn label_or(label: Option<&str>, default: &str) -> String {
    match label.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default.to_string(),
    }
}

/// Number of decimal digits needed to display `value` exactly.
fn decimals(value: f64) -> u32 {
    let text = format!("{value}");
    match text.split_once('.') {
        Some((_, fraction)) => (fraction.len() as u32).min(MAX_PRECISION),
        None => 0,
    }
}

/// Trim text tickets and drop the blank ones.
fn clean_bag(bag: &[GeneratedValue]) -> Vec<GeneratedValue> {
    bag.iter()
        .filter_map(|ticket| match ticket {
            GeneratedValue::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| GeneratedValue::Text(text.to_string()))
            }
            other => Some(other.clone()),
        })
        .collect()
}
