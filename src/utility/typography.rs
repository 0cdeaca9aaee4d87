use crate::scene::{FontWeight, TextCase};

/// One row of the Quasar typography scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    pub font_size: f64,
    pub weight: FontWeight,
    pub letter_spacing: f64,
    pub text_case: Option<TextCase>,
}

const fn scale(font_size: f64, weight: FontWeight, letter_spacing: f64) -> TypeScale {
    TypeScale {
        font_size,
        weight,
        letter_spacing,
        text_case: None,
    }
}

/// Typography classes by name, without the `text-` prefix.
pub const TYPE_SCALE: &[(&str, TypeScale)] = &[
    ("h1", scale(48.0, FontWeight::Bold, -0.5)),
    ("h2", scale(40.0, FontWeight::Bold, -0.4)),
    ("h3", scale(34.0, FontWeight::Bold, -0.3)),
    ("h4", scale(28.0, FontWeight::Bold, -0.2)),
    ("h5", scale(24.0, FontWeight::Bold, -0.1)),
    ("h6", scale(20.0, FontWeight::Bold, 0.0)),
    ("subtitle1", scale(16.0, FontWeight::Regular, 0.15)),
    ("subtitle2", scale(14.0, FontWeight::Medium, 0.1)),
    ("body1", scale(16.0, FontWeight::Regular, 0.5)),
    ("body2", scale(14.0, FontWeight::Regular, 0.25)),
    ("caption", scale(12.0, FontWeight::Regular, 0.4)),
    (
        "overline",
        TypeScale {
            font_size: 10.0,
            weight: FontWeight::Medium,
            letter_spacing: 1.5,
            text_case: Some(TextCase::Upper),
        },
    ),
];

/// Look up a `text-{name}` typography class.
pub fn type_scale(class: &str) -> Option<TypeScale> {
    let name = class.strip_prefix("text-")?;
    TYPE_SCALE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, scale)| *scale)
}
