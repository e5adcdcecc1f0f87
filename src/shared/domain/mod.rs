/// Identifier types shared by every bounded context
///
/// Identities are opaque unsigned ids owned by the downstream services; this
/// service only stores and forwards them.
pub type UserId = u64;
pub type MediaId = u64;
pub type ReviewId = u64;
