/// Stable identity of a versioned entity (tender or bid). Shared by every
/// version row of that entity.
pub type EntityId = uuid::Uuid;

/// Identity of an employee.
pub type ActorId = uuid::Uuid;

/// Identity of an organization.
pub type OrganizationId = uuid::Uuid;

/// Version numbers start at 1 and are dense per entity id.
pub type Version = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// First version number assigned to a freshly created entity.
pub const INITIAL_VERSION: Version = 1;

/// Selects a row out of an entity's version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    /// The row with the highest version number.
    Latest,
    /// The row with exactly this version number.
    Exact(Version),
}
