//! Logical API endpoints and their path prefixes.

/// A named VersionOne API surface.
///
/// Each variant maps to a fixed path prefix under the instance URL. The
/// prefixes are part of the wire contract and must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    /// Asset type metadata (`meta.v1/`).
    Meta,
    /// Asset data (`rest-1.v1/Data/`).
    Data,
    /// Asset history (`rest-1.v1/Hist/`).
    History,
    /// New-asset templates (`rest-1.v1/New`).
    New,
    /// Query API (`query.v1/`).
    Query,
    /// Localization (`loc.v1/`).
    Loc,
    /// Localization, second revision (`loc-2.v1/`).
    Loc2,
    /// Instance configuration (`config.v1/`).
    Config,
}

impl Api {
    /// Every logical endpoint, in table order.
    pub const ALL: [Api; 8] = [
        Api::Meta,
        Api::Data,
        Api::History,
        Api::New,
        Api::Query,
        Api::Loc,
        Api::Loc2,
        Api::Config,
    ];

    /// The literal path prefix for this endpoint.
    pub const fn path(self) -> &'static str {
        match self {
            Api::Meta => "meta.v1/",
            Api::Data => "rest-1.v1/Data/",
            Api::History => "rest-1.v1/Hist/",
            Api::New => "rest-1.v1/New",
            Api::Query => "query.v1/",
            Api::Loc => "loc.v1/",
            Api::Loc2 => "loc-2.v1/",
            Api::Config => "config.v1/",
        }
    }
}

impl std::fmt::Display for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
