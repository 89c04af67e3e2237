//! The closed set of attribute identifiers used in HPKG/HPKR attribute streams.
//!
//! Each identifier carries a numeric code (its position in the stream encoding), a
//! protocol name, and a declared value type. A record whose decoded payload type does
//! not agree with its identifier's declared type is a malformed stream.

use strum::{EnumCount, EnumIter, FromRepr};

/// The kind of value an attribute carries.
///
/// `Int` covers both the signed and unsigned wire encodings; the distinction is made at
/// decode time when the payload is widened.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum AttributeType {
    /// Signed or unsigned integer payload.
    Int,
    /// UTF-8 string payload, inline or via the string table.
    String,
    /// Binary payload, inline or referenced in the heap.
    Raw,
}

/// Identifiers for the attributes defined by the Haiku package format.
///
/// The numeric values correspond to the attribute codes in the serialized stream; the
/// set is closed, and a stream carrying a code outside it is malformed.
///
/// Codes 0..=14 describe the file tree carried in an HPKG table of contents (directory
/// entries, permissions, timestamps, file data). Codes 15 and up describe package
/// metadata (identity, version, relationships, users and groups) and appear both in
/// HPKG package-attribute sections and HPKR repository indices, where each package is
/// one [`AttributeId::Package`] subtree.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum AttributeId {
    /// `dir:entry` (0) - A named entry in a directory.
    DirectoryEntry = 0,
    /// `file:type` (1) - The kind of the entry (file, directory, symlink).
    FileType = 1,
    /// `file:permissions` (2) - POSIX permission bits.
    FilePermissions = 2,
    /// `file:user` (3) - Owning user name.
    FileUser = 3,
    /// `file:group` (4) - Owning group name.
    FileGroup = 4,
    /// `file:atime` (5) - Access time, seconds.
    FileAtime = 5,
    /// `file:mtime` (6) - Modification time, seconds.
    FileMtime = 6,
    /// `file:crtime` (7) - Creation time, seconds.
    FileCrtime = 7,
    /// `file:atime:nanos` (8) - Access time, nanosecond component.
    FileAtimeNanos = 8,
    /// `file:mtime:nanos` (9) - Modification time, nanosecond component.
    FileMtimeNanos = 9,
    /// `file:crtime:nanos` (10) - Creation time, nanosecond component.
    FileCrtimeNanos = 10,
    /// `file:attribute` (11) - A named extended attribute on the entry.
    FileAttribute = 11,
    /// `file:attribute:type` (12) - The type code of an extended attribute.
    FileAttributeType = 12,
    /// `data` (13) - The payload bytes of a file or extended attribute.
    Data = 13,
    /// `symlink:path` (14) - Target path of a symbolic link.
    SymlinkPath = 14,
    /// `package:name` (15) - The package name.
    PackageName = 15,
    /// `package:summary` (16) - One-line summary.
    PackageSummary = 16,
    /// `package:description` (17) - Full description.
    PackageDescription = 17,
    /// `package:vendor` (18) - Vendor name.
    PackageVendor = 18,
    /// `package:packager` (19) - Packager contact.
    PackagePackager = 19,
    /// `package:flags` (20) - Package flag bits.
    PackageFlags = 20,
    /// `package:architecture` (21) - Architecture code; see `PkgArchitecture`.
    PackageArchitecture = 21,
    /// `package:version.major` (22) - Major version component.
    PackageVersionMajor = 22,
    /// `package:version.minor` (23) - Minor version component.
    PackageVersionMinor = 23,
    /// `package:version.micro` (24) - Micro version component.
    PackageVersionMicro = 24,
    /// `package:version.revision` (25) - Numeric revision.
    PackageVersionRevision = 25,
    /// `package:copyright` (26) - A copyright statement; may repeat.
    PackageCopyright = 26,
    /// `package:license` (27) - A license name; may repeat.
    PackageLicense = 27,
    /// `package:provides` (28) - A provided resolvable.
    PackageProvides = 28,
    /// `package:requires` (29) - A required resolvable expression.
    PackageRequires = 29,
    /// `package:supplements` (30) - A supplemented resolvable expression.
    PackageSupplements = 30,
    /// `package:conflicts` (31) - A conflicting resolvable expression.
    PackageConflicts = 31,
    /// `package:freshens` (32) - A freshened resolvable expression.
    PackageFreshens = 32,
    /// `package:replaces` (33) - A replaced package name.
    PackageReplaces = 33,
    /// `package:resolvable.operator` (34) - Comparison operator code.
    PackageResolvableOperator = 34,
    /// `package:checksum` (35) - Checksum string.
    PackageChecksum = 35,
    /// `package:version.prerelease` (36) - Pre-release version component.
    PackageVersionPreRelease = 36,
    /// `package:provides.compatible` (37) - Backwards-compatible version of a provide.
    PackageProvidesCompatible = 37,
    /// `package:url` (38) - Home page URL.
    PackageUrl = 38,
    /// `package:source-url` (39) - Source location URL.
    PackageSourceUrl = 39,
    /// `package:install-path` (40) - Non-default installation path.
    PackageInstallPath = 40,
    /// `package:base-package` (41) - Name of the base package.
    PackageBasePackage = 41,
    /// `package:global-writable-file` (42) - A global writable file path.
    PackageGlobalWritableFile = 42,
    /// `package:user-settings-file` (43) - A per-user settings file path.
    PackageUserSettingsFile = 43,
    /// `package:writable-file-update-type` (44) - Update policy code.
    PackageWritableFileUpdateType = 44,
    /// `package:settings-file-template` (45) - Template for a settings file.
    PackageSettingsFileTemplate = 45,
    /// `package:user` (46) - A system user the package installs.
    PackageUser = 46,
    /// `package:user.real-name` (47) - Real name of an installed user.
    PackageUserRealName = 47,
    /// `package:user.home` (48) - Home directory of an installed user.
    PackageUserHome = 48,
    /// `package:user.shell` (49) - Shell of an installed user.
    PackageUserShell = 49,
    /// `package:user.group` (50) - A group of an installed user.
    PackageUserGroup = 50,
    /// `package:group` (51) - A system group the package installs.
    PackageGroup = 51,
    /// `package:post-install-script` (52) - Path of a post-install script.
    PackagePostInstallScript = 52,
    /// `package:is-writable-directory` (53) - Marks a directory as writable.
    PackageIsWritableDirectory = 53,
    /// `package` (54) - Root of one package's attribute subtree in a repository index.
    Package = 54,
}

impl AttributeId {
    /// The protocol-level name of this attribute.
    #[must_use]
    pub fn attribute_name(&self) -> &'static str {
        match self {
            AttributeId::DirectoryEntry => "dir:entry",
            AttributeId::FileType => "file:type",
            AttributeId::FilePermissions => "file:permissions",
            AttributeId::FileUser => "file:user",
            AttributeId::FileGroup => "file:group",
            AttributeId::FileAtime => "file:atime",
            AttributeId::FileMtime => "file:mtime",
            AttributeId::FileCrtime => "file:crtime",
            AttributeId::FileAtimeNanos => "file:atime:nanos",
            AttributeId::FileMtimeNanos => "file:mtime:nanos",
            AttributeId::FileCrtimeNanos => "file:crtime:nanos",
            AttributeId::FileAttribute => "file:attribute",
            AttributeId::FileAttributeType => "file:attribute:type",
            AttributeId::Data => "data",
            AttributeId::SymlinkPath => "symlink:path",
            AttributeId::PackageName => "package:name",
            AttributeId::PackageSummary => "package:summary",
            AttributeId::PackageDescription => "package:description",
            AttributeId::PackageVendor => "package:vendor",
            AttributeId::PackagePackager => "package:packager",
            AttributeId::PackageFlags => "package:flags",
            AttributeId::PackageArchitecture => "package:architecture",
            AttributeId::PackageVersionMajor => "package:version.major",
            AttributeId::PackageVersionMinor => "package:version.minor",
            AttributeId::PackageVersionMicro => "package:version.micro",
            AttributeId::PackageVersionRevision => "package:version.revision",
            AttributeId::PackageCopyright => "package:copyright",
            AttributeId::PackageLicense => "package:license",
            AttributeId::PackageProvides => "package:provides",
            AttributeId::PackageRequires => "package:requires",
            AttributeId::PackageSupplements => "package:supplements",
            AttributeId::PackageConflicts => "package:conflicts",
            AttributeId::PackageFreshens => "package:freshens",
            AttributeId::PackageReplaces => "package:replaces",
            AttributeId::PackageResolvableOperator => "package:resolvable.operator",
            AttributeId::PackageChecksum => "package:checksum",
            AttributeId::PackageVersionPreRelease => "package:version.prerelease",
            AttributeId::PackageProvidesCompatible => "package:provides.compatible",
            AttributeId::PackageUrl => "package:url",
            AttributeId::PackageSourceUrl => "package:source-url",
            AttributeId::PackageInstallPath => "package:install-path",
            AttributeId::PackageBasePackage => "package:base-package",
            AttributeId::PackageGlobalWritableFile => "package:global-writable-file",
            AttributeId::PackageUserSettingsFile => "package:user-settings-file",
            AttributeId::PackageWritableFileUpdateType => "package:writable-file-update-type",
            AttributeId::PackageSettingsFileTemplate => "package:settings-file-template",
            AttributeId::PackageUser => "package:user",
            AttributeId::PackageUserRealName => "package:user.real-name",
            AttributeId::PackageUserHome => "package:user.home",
            AttributeId::PackageUserShell => "package:user.shell",
            AttributeId::PackageUserGroup => "package:user.group",
            AttributeId::PackageGroup => "package:group",
            AttributeId::PackagePostInstallScript => "package:post-install-script",
            AttributeId::PackageIsWritableDirectory => "package:is-writable-directory",
            AttributeId::Package => "package",
        }
    }

    /// The value type every record with this identifier must carry.
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeId::FileType
            | AttributeId::FilePermissions
            | AttributeId::FileAtime
            | AttributeId::FileMtime
            | AttributeId::FileCrtime
            | AttributeId::FileAtimeNanos
            | AttributeId::FileMtimeNanos
            | AttributeId::FileCrtimeNanos
            | AttributeId::FileAttributeType
            | AttributeId::PackageFlags
            | AttributeId::PackageArchitecture
            | AttributeId::PackageVersionRevision
            | AttributeId::PackageResolvableOperator
            | AttributeId::PackageWritableFileUpdateType
            | AttributeId::PackageIsWritableDirectory => AttributeType::Int,
            AttributeId::Data => AttributeType::Raw,
            _ => AttributeType::String,
        }
    }
}
