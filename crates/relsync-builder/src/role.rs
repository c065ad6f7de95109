//! Role descriptors: which side of a relationship the source item plays

use relsync_domain::{Catalog, ItemSummary, Side, Template};

/// Describes the side the source item occupies and how templates are resolved
///
/// The reconciliation algorithm is written once against this trait and
/// instantiated for [`OwnerRole`] and [`DependentRole`].
pub trait Role {
    /// Side of the relationship held by the source item
    const SIDE: Side;

    /// Role name used in logs
    const NAME: &'static str;

    /// Resolve the template assigned to relationships created for `item`
    fn resolve_template<C: Catalog>(
        catalog: &C,
        template_name: &str,
        item: &ItemSummary,
    ) -> Result<Option<Template>, C::Error>;

    /// Side of the relationship held by the related items
    fn peer() -> Side {
        Self::SIDE.opposite()
    }
}

/// The source item owns the relationships; related items are dependents
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerRole;

impl Role for OwnerRole {
    const SIDE: Side = Side::Owner;
    const NAME: &'static str = "owner";

    // Owner templates are looked up by name only.
    fn resolve_template<C: Catalog>(
        catalog: &C,
        template_name: &str,
        _item: &ItemSummary,
    ) -> Result<Option<Template>, C::Error> {
        catalog.find_template_by_name(template_name)
    }
}

/// The source item is the dependent; related items own the relationships
#[derive(Debug, Clone, Copy, Default)]
pub struct DependentRole;

impl Role for DependentRole {
    const SIDE: Side = Side::Dependent;
    const NAME: &'static str = "dependent";

    fn resolve_template<C: Catalog>(
        catalog: &C,
        template_name: &str,
        item: &ItemSummary,
    ) -> Result<Option<Template>, C::Error> {
        catalog.find_template_by_name_and_type(template_name, item.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_mirrored() {
        assert_eq!(OwnerRole::SIDE, Side::Owner);
        assert_eq!(OwnerRole::peer(), Side::Dependent);
        assert_eq!(DependentRole::SIDE, Side::Dependent);
        assert_eq!(DependentRole::peer(), Side::Owner);
    }
}
