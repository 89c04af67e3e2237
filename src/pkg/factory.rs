//! Projection from a `package` attribute subtree to a [`Pkg`].

use crate::{
    attributes::{Attribute, AttributeContext, AttributeId, AttributeType},
    pkg::{Pkg, PkgArchitecture, PkgUrl, PkgUrlType, PkgVersion},
    Error, Result,
};

fn string_value(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
) -> Result<String> {
    attribute
        .value(context)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Projection(format!(
                "the '{}' attribute was expected to carry a string",
                attribute.id().attribute_name()
            ))
        })
}

fn optional_string(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
    id: AttributeId,
) -> Result<Option<String>> {
    attribute
        .child(id)
        .map(|child| string_value(context, child))
        .transpose()
}

fn required_string(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
    id: AttributeId,
) -> Result<String> {
    let child = attribute.child(id).ok_or_else(|| {
        Error::Projection(format!(
            "the '{}' attribute must be present",
            id.attribute_name()
        ))
    })?;
    string_value(context, child)
}

fn create_version(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
) -> Result<PkgVersion> {
    let revision = attribute
        .child(AttributeId::PackageVersionRevision)
        .map(|child| {
            let value = child.value(context)?.as_int().ok_or_else(|| {
                Error::Projection(
                    "the 'package:version.revision' attribute was expected to carry an integer"
                        .to_string(),
                )
            })?;
            i64::try_from(value).map_err(|_| {
                Error::Projection(format!("the version revision {value} is out of range"))
            })
        })
        .transpose()?;

    Ok(PkgVersion {
        major: string_value(context, attribute)?,
        minor: optional_string(context, attribute, AttributeId::PackageVersionMinor)?,
        micro: optional_string(context, attribute, AttributeId::PackageVersionMicro)?,
        pre_release: optional_string(context, attribute, AttributeId::PackageVersionPreRelease)?,
        revision,
    })
}

fn create_architecture(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
) -> Result<PkgArchitecture> {
    let code = attribute.value(context)?.as_int().ok_or_else(|| {
        Error::Projection(
            "the 'package:architecture' attribute was expected to carry an integer".to_string(),
        )
    })?;

    u8::try_from(code)
        .ok()
        .and_then(PkgArchitecture::from_repr)
        .ok_or_else(|| Error::Projection(format!("unknown package architecture code {code}")))
}

/// Collect the string values of every child with `id`, skipping non-string
/// occurrences. Such occurrences are illegal, but tolerating them keeps otherwise
/// readable packages readable.
fn collect_strings(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
    id: AttributeId,
) -> Result<Vec<String>> {
    let mut assembly = Vec::new();
    for child in attribute.children_with_id(id) {
        if child.attribute_type() == AttributeType::String {
            assembly.push(string_value(context, child)?);
        }
    }
    Ok(assembly)
}

/// Project a `package` attribute subtree into a [`Pkg`].
///
/// `name`, `vendor`, the architecture and the `version.major` subtree are required;
/// summary, description and home page URL are optional; copyrights and licenses may
/// repeat.
///
/// # Errors
/// Returns [`crate::Error::Projection`] when the subtree is not rooted at a `package`
/// attribute, a required attribute is missing, or a value has an unusable shape;
/// resolution errors from the context pass through unchanged.
pub fn create_package(
    context: &AttributeContext<'_>,
    attribute: &Attribute,
) -> Result<Pkg> {
    if attribute.id() != AttributeId::Package {
        return Err(Error::Projection(format!(
            "a package can only be projected from a '{}' attribute, not '{}'",
            AttributeId::Package.attribute_name(),
            attribute.id().attribute_name()
        )));
    }

    let name = required_string(context, attribute, AttributeId::PackageName)?;
    let vendor = required_string(context, attribute, AttributeId::PackageVendor)?;
    let summary = optional_string(context, attribute, AttributeId::PackageSummary)?;
    let description = optional_string(context, attribute, AttributeId::PackageDescription)?;

    let home_page_url = optional_string(context, attribute, AttributeId::PackageUrl)?
        .filter(|url| !url.is_empty())
        .map(|url| PkgUrl::new(url, PkgUrlType::HomePage));

    let architecture =
        create_architecture(context, attribute.expect_child(AttributeId::PackageArchitecture)?)?;

    let version = create_version(
        context,
        attribute.expect_child(AttributeId::PackageVersionMajor)?,
    )?;

    let copyrights = collect_strings(context, attribute, AttributeId::PackageCopyright)?;
    let licenses = collect_strings(context, attribute, AttributeId::PackageLicense)?;

    Ok(Pkg {
        name,
        vendor,
        summary,
        description,
        home_page_url,
        architecture,
        version,
        copyrights,
        licenses,
    })
}
