pub const STYLE_QUALIFIERS: &str = "handcrafted from modeling clay with a visible clay texture and a smooth finish, \
     isolated on a plain white background, soft even studio lighting, \
     1:1 aspect ratio, 1024x1024 resolution";

pub const NO_SHADOWS_CLAUSE: &str = "no shadows, no drop shadows";
const SOFT_SHADOWS_CLAUSE: &str = "soft natural shadows beneath the sculpture";

/// Turns a user description into the full generation prompt. The description is used as is.
pub fn build_prompt(description: &str, shadows: bool) -> String {
    let shadow_clause = if shadows {
        SOFT_SHADOWS_CLAUSE
    } else {
        NO_SHADOWS_CLAUSE
    };

    format!("A clay sculpture of {description}, {STYLE_QUALIFIERS}, {shadow_clause}.")
}
