//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier could not be parsed.
    #[error("{0} must be a valid UUID")]
    InvalidId(&'static str),
    /// A numeric value required to be positive was zero.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// A value did not match its fixed format.
    #[error("{field} must match the format {format}")]
    InvalidFormat {
        field: &'static str,
        format: &'static str,
    },
    /// A numeric value fell outside its permitted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

fn trim_and_bound<S: Into<String>>(
    value: S,
    field: &'static str,
    max: usize,
) -> Result<String, TypeConstraintError> {
    let trimmed = trim_and_require_non_empty(value, field)?;
    if trimmed.chars().count() > max {
        Err(TypeConstraintError::TooLong { field, max })
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate 128-bit random identifiers.
macro_rules! uuid_id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses an identifier from its hyphenated string form.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidId($field))
            }

            /// Returns the raw UUID backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a trimmed, non-empty value no longer than [`Self::MAX_CHARS`].
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_bound(value, $field, $max).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Generates a closed string enum with `as_str`, `Display` and `TryFrom<&str>`.
macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident, $label:expr, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation of the variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "{}: {other}",
                        $label
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }
    };
}

uuid_id_newtype!(ProductId, "Unique identifier for a product.", "product_id");
uuid_id_newtype!(GalleryId, "Unique identifier for a gallery.", "gallery_id");
uuid_id_newtype!(ImageId, "Unique identifier for a gallery image.", "image_id");
uuid_id_newtype!(
    VariationId,
    "Unique identifier for a product variation.",
    "variation_id"
);

bounded_string_newtype!(ProductName, "Product display name.", "product name", 100);
bounded_string_newtype!(
    VariationName,
    "Product variation display name.",
    "variation name",
    100
);
bounded_string_newtype!(ImageCaption, "Short image caption.", "caption", 200);
bounded_string_newtype!(
    ImageDescription,
    "Long image description.",
    "description",
    1000
);

/// Business code of a product in the fixed `AAA-0000` format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ProductCode(String);

impl ProductCode {
    pub const FORMAT: &'static str = "AAA-0000";

    /// Trims and upper-cases the input, then checks the fixed format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = trim_and_require_non_empty(value, "product code")?.to_ascii_uppercase();
        let bytes = code.as_bytes();
        let well_formed = bytes.len() == 8
            && bytes[..3].iter().all(u8::is_ascii_uppercase)
            && bytes[3] == b'-'
            && bytes[4..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(TypeConstraintError::InvalidFormat {
                field: "product code",
                format: Self::FORMAT,
            });
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProductCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductCode {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductCode> for String {
    fn from(value: ProductCode) -> Self {
        value.0
    }
}

impl PartialEq<&str> for ProductCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Image URL, validated on construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Constructs a trimmed URL and validates its format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "image url")?;
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("image url"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ImageUrl {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageUrl> for String {
    fn from(value: ImageUrl) -> Self {
        value.0
    }
}

impl PartialEq<&str> for ImageUrl {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Hex color code stored as `#RRGGBB` in upper case.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ColorCode(String);

impl ColorCode {
    /// Accepts `RRGGBB` with or without a leading `#`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = trim_and_require_non_empty(value, "color code")?;
        let digits = raw.strip_prefix('#').unwrap_or(&raw);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeConstraintError::InvalidFormat {
                field: "color code",
                format: "#RRGGBB",
            });
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColorCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorCode> for String {
    fn from(value: ColorCode) -> Self {
        value.0
    }
}

/// Non-negative price value in standard currency units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProductPrice(f64);

impl ProductPrice {
    /// Constructs a finite numeric value that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("price"))
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ProductPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ProductPrice {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductPrice> for f64 {
    fn from(value: ProductPrice) -> Self {
        value.0
    }
}

impl PartialEq<f64> for ProductPrice {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Position of an image inside its gallery, starting at one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct DisplayOrder(u32);

impl DisplayOrder {
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveNumber("display order"))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DisplayOrder {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DisplayOrder> for u32 {
    fn from(value: DisplayOrder) -> Self {
        value.0
    }
}

/// Lazy-load rank of a gallery image, `1` loads first and `5` loads last.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct LazyLoadPriority(u8);

impl LazyLoadPriority {
    pub const HIGHEST: Self = Self(1);
    pub const LOWEST: Self = Self(5);

    pub fn new(value: u8) -> Result<Self, TypeConstraintError> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange {
                field: "lazy load priority",
                min: 1,
                max: 5,
            })
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LazyLoadPriority {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LazyLoadPriority> for u8 {
    fn from(value: LazyLoadPriority) -> Self {
        value.0
    }
}

closed_enum!(
    /// Stock availability advertised for a product.
    Availability, "availability", {
        Available => "available",
        OnRequest => "on_request",
        OutOfStock => "out_of_stock",
    }
);

closed_enum!(
    /// Closed taxonomy of gallery shots.
    ImageCategory, "image category", {
        Frontal => "frontal",
        Lateral => "lateral",
        Detalle => "detalle",
        Contexto => "contexto",
        Perspectiva => "perspectiva",
    }
);

closed_enum!(
    /// Kind of product variation.
    VariationType, "variation type", {
        Color => "color",
        Finish => "finish",
        Material => "material",
        Texture => "texture",
    }
);

closed_enum!(
    /// How a gallery is presented to the shopper.
    DisplayMode, "display mode", {
        Page => "page",
        Modal => "modal",
    }
);

closed_enum!(
    /// Catalog layout; presentation only.
    LayoutType, "layout type", {
        Grid => "grid",
        List => "list",
    }
);

closed_enum!(
    /// Ordering applied to the catalog listing.
    SortCriterion, "sort criterion", {
        NameAsc => "name_asc",
        NameDesc => "name_desc",
        PriceAsc => "price_asc",
        PriceDesc => "price_desc",
        DateNewest => "date_newest",
        DateOldest => "date_oldest",
        Popularity => "popularity",
    }
);

closed_enum!(
    /// Navigation strategy used to slice the catalog.
    NavigationMode, "navigation mode", {
        Pagination => "pagination",
        InfiniteScroll => "infinite_scroll",
    }
);

closed_enum!(
    /// Shopper interaction counted towards popularity.
    InteractionKind, "interaction kind", {
        View => "view",
        Click => "click",
        Interaction => "interaction",
    }
);

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Page
    }
}

impl Default for LayoutType {
    fn default() -> Self {
        Self::Grid
    }
}

impl Default for SortCriterion {
    fn default() -> Self {
        Self::NameAsc
    }
}

impl Default for NavigationMode {
    fn default() -> Self {
        Self::Pagination
    }
}

/// Page sizes offered by the catalog.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub enum ItemsPerPage {
    Twelve,
    #[default]
    TwentyFour,
    FortyEight,
}

impl ItemsPerPage {
    pub const fn get(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
            Self::FortyEight => 48,
        }
    }
}

impl TryFrom<usize> for ItemsPerPage {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(Self::Twelve),
            24 => Ok(Self::TwentyFour),
            48 => Ok(Self::FortyEight),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "items per page must be 12, 24 or 48, got {other}"
            ))),
        }
    }
}

impl From<ItemsPerPage> for usize {
    fn from(value: ItemsPerPage) -> Self {
        value.get()
    }
}
