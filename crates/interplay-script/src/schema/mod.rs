//! Schema definitions for RON content files

pub mod conditions;
pub mod interactables;

/// Parser options shared by every content file
///
/// Authors may write `target: "caption"` for optional fields and
/// `Text(message: ..)` for newtype reaction variants.
pub(crate) fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(
        ron::extensions::Extensions::IMPLICIT_SOME
            | ron::extensions::Extensions::UNWRAP_VARIANT_NEWTYPES,
    )
}
