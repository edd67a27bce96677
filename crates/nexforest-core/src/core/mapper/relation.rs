use super::collection::{BelongsTo, HasN, HasOne};
use slotmap::Key;

/// A declared association between two entity types.
///
/// A relation is a zero-sized marker type. It names the key type of the owning
/// side and of the member side; entity types opt into the relation by
/// implementing [`Owner`] (or [`SingleOwner`]) and [`Member`] for it. The
/// [`relation!`](crate::relation) macro declares the marker and both impls at once.
pub trait Relation {
    /// Key of the entity holding the collection (or the single slot).
    type Owner: Key;
    /// Key of the entity holding the back reference.
    type Member: Key;
    /// Human readable name used in errors and logs.
    const NAME: &'static str;
}

/// Anything addressed by a string id inside its owner's collection.
pub trait Identified {
    fn id(&self) -> &str;
}

/// The `has_n` side of a relation.
pub trait Owner<R: Relation> {
    fn members(&self) -> &HasN<R::Member>;
    fn members_mut(&mut self) -> &mut HasN<R::Member>;
}

/// The `has_one` side of a relation.
pub trait SingleOwner<R: Relation> {
    fn slot(&self) -> &HasOne<R::Member>;
    fn slot_mut(&mut self) -> &mut HasOne<R::Member>;
}

/// The `belongs_to` side of a relation.
pub trait Member<R: Relation> {
    fn owner(&self) -> &BelongsTo<R::Owner>;
    fn owner_mut(&mut self) -> &mut BelongsTo<R::Owner>;
}

/// Declares a relation marker together with its owner and member accessors.
///
/// ```ignore
/// relation! {
///     /// Nodes registered with a tree.
///     pub TreeNodes: Tree.nodes[TreeKey] has_n Node.tree[NodeKey];
/// }
/// ```
///
/// The owner field must be a [`HasN`] (for `has_n`) or a [`HasOne`] (for
/// `has_one`); the member field must be a [`BelongsTo`].
#[macro_export]
macro_rules! relation {
    (@marker $(#[$meta:meta])* $vis:vis $name:ident, $owner_key:ty, $member_key:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::core::mapper::Relation for $name {
            type Owner = $owner_key;
            type Member = $member_key;
            const NAME: &'static str = stringify!($name);
        }
    };
    (@member $name:ident, $member:ident, $member_field:ident, $owner_key:ty) => {
        impl $crate::core::mapper::Member<$name> for $member {
            fn owner(&self) -> &$crate::core::mapper::BelongsTo<$owner_key> {
                &self.$member_field
            }
            fn owner_mut(&mut self) -> &mut $crate::core::mapper::BelongsTo<$owner_key> {
                &mut self.$member_field
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident : $owner:ident . $owner_field:ident [ $owner_key:ty ]
            has_n $member:ident . $member_field:ident [ $member_key:ty ];
    ) => {
        $crate::relation!(@marker $(#[$meta])* $vis $name, $owner_key, $member_key);

        impl $crate::core::mapper::Owner<$name> for $owner {
            fn members(&self) -> &$crate::core::mapper::HasN<$member_key> {
                &self.$owner_field
            }
            fn members_mut(&mut self) -> &mut $crate::core::mapper::HasN<$member_key> {
                &mut self.$owner_field
            }
        }

        $crate::relation!(@member $name, $member, $member_field, $owner_key);
    };
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident : $owner:ident . $owner_field:ident [ $owner_key:ty ]
            has_one $member:ident . $member_field:ident [ $member_key:ty ];
    ) => {
        $crate::relation!(@marker $(#[$meta])* $vis $name, $owner_key, $member_key);

        impl $crate::core::mapper::SingleOwner<$name> for $owner {
            fn slot(&self) -> &$crate::core::mapper::HasOne<$member_key> {
                &self.$owner_field
            }
            fn slot_mut(&mut self) -> &mut $crate::core::mapper::HasOne<$member_key> {
                &mut self.$owner_field
            }
        }

        $crate::relation!(@member $name, $member, $member_field, $owner_key);
    };
}
