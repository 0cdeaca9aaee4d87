/// Quasar spacing scale: `none`, `xs`, `sm`, `md`, `lg`, `xl`.
pub const SPACING_SCALE: &[(&str, f64)] = &[
    ("none", 0.0),
    ("xs", 4.0),
    ("sm", 8.0),
    ("md", 16.0),
    ("lg", 24.0),
    ("xl", 32.0),
];

/// Pixel value of a spacing size key.
pub fn spacing_value(size: &str) -> Option<f64> {
    SPACING_SCALE
        .iter()
        .find(|(key, _)| *key == size)
        .map(|(_, px)| *px)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingProperty {
    Margin,
    Padding,
}

/// Which box sides a spacing class touches, in top/right/bottom/left order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingSides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl SpacingSides {
    fn from_direction(direction: Option<char>) -> Option<Self> {
        let sides = |top, right, bottom, left| SpacingSides {
            top,
            right,
            bottom,
            left,
        };
        Some(match direction {
            None | Some('a') => sides(true, true, true, true),
            Some('t') => sides(true, false, false, false),
            Some('r') => sides(false, true, false, false),
            Some('b') => sides(false, false, true, false),
            Some('l') => sides(false, false, false, true),
            Some('x') => sides(false, true, false, true),
            Some('y') => sides(true, false, true, false),
            Some(_) => return None,
        })
    }
}

/// A parsed `q-{m|p}{direction?}-{size}` class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingClass {
    pub property: SpacingProperty,
    pub sides: SpacingSides,
    pub value: f64,
}

/// Parse a spacing class such as `q-pa-md`, `q-mt-xs` or `q-p-lg`.
pub fn parse_spacing_class(class: &str) -> Option<SpacingClass> {
    let rest = class.strip_prefix("q-")?;
    let (head, size) = rest.split_once('-')?;

    let mut chars = head.chars();
    let property = match chars.next()? {
        'm' => SpacingProperty::Margin,
        'p' => SpacingProperty::Padding,
        _ => return None,
    };
    let direction = chars.next();
    if chars.next().is_some() {
        return None;
    }

    Some(SpacingClass {
        property,
        sides: SpacingSides::from_direction(direction)?,
        value: spacing_value(size)?,
    })
}
