/// Keys for the few client-facing messages that localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    BadSearch,
    TargetExcluded,
    TargetInactive,
}

/// Minimal built-in catalog. Full catalog management lives upstream of this
/// service; the gateway only needs these strings, in English and Spanish,
/// with English as the fallback for everything else.
pub fn message(language: &str, key: MessageKey) -> &'static str {
    let spanish = language.starts_with("es");
    match (key, spanish) {
        (MessageKey::BadSearch, false) => "That search is not valid. Please try again.",
        (MessageKey::BadSearch, true) => "Esa búsqueda no es válida. Inténtalo de nuevo.",
        (MessageKey::TargetExcluded, false) => "The target pool cannot also be excluded.",
        (MessageKey::TargetExcluded, true) => "El grupo de destino no puede ser excluido.",
        (MessageKey::TargetInactive, false) => "The target pool is not active.",
        (MessageKey::TargetInactive, true) => "El grupo de destino no está activo.",
    }
}
