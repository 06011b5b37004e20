//! Catalog of the services orders are placed for.

const SERVICES: &[(i64, &str)] = &[(1, "More views"), (2, "Highlighting"), (3, "XL-advert")];

/// Returns the name of a known service.
pub fn service_name(service_id: i64) -> Option<&'static str> {
    SERVICES
        .iter()
        .find(|(id, _)| *id == service_id)
        .map(|(_, name)| *name)
}

/// Like [`service_name`], with a fallback for ids outside the catalog.
pub fn service_display_name(service_id: i64) -> String {
    service_name(service_id)
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("Unknown service: {service_id}"))
}
