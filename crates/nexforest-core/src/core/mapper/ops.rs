use super::error::MapperError;
use super::relation::{Identified, Member, Owner, Relation, SingleOwner};
use serde::Deserialize;
use slotmap::SlotMap;
use std::collections::HashSet;
use tracing::{trace, warn};

/// What `add` does when the owner already holds a different member with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateIdPolicy {
    /// The previous occupant is unlinked and replaced (last write wins).
    #[default]
    Overwrite,
    /// The insertion fails with [`MapperError::DuplicateId`].
    Reject,
}

/// Addresses a member either by its key or by its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRef<'a, K> {
    Key(K),
    Id(&'a str),
}

/// Links `member` into `owner`'s collection and points the member back at `owner`.
///
/// A member linked to another owner is first removed from that owner's collection.
/// Adding a member that is already linked to `owner` does nothing, which keeps a
/// call made from either side of the relation from bouncing back to the other.
///
/// # Return
///
/// The member evicted by the overwrite policy, if any. The evicted member's back
/// reference is cleared.
///
/// # Errors
///
/// Fails before any mutation if either key is dangling, the member id is empty, or
/// the id is taken and `policy` is [`DuplicateIdPolicy::Reject`].
pub fn add<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    owner: R::Owner,
    member: R::Member,
    policy: DuplicateIdPolicy,
) -> Result<Option<R::Member>, MapperError>
where
    R: Relation,
    O: Owner<R>,
    M: Member<R> + Identified,
{
    let owner_entity = owners
        .get(owner)
        .ok_or(MapperError::DanglingOwner { relation: R::NAME })?;
    let member_entity = members
        .get(member)
        .ok_or(MapperError::DanglingMember { relation: R::NAME })?;

    let id = member_entity.id().to_string();
    if id.is_empty() {
        return Err(MapperError::MissingId { relation: R::NAME });
    }

    let previous = member_entity.owner().get();
    let occupant = owner_entity.members().get(&id);

    if previous == Some(owner) && occupant == Some(member) {
        trace!(relation = R::NAME, id = %id, "member already linked");
        return Ok(None);
    }

    let evicted = match occupant {
        Some(other) if other != member => {
            if policy == DuplicateIdPolicy::Reject {
                return Err(MapperError::DuplicateId {
                    relation: R::NAME,
                    id,
                });
            }
            warn!(relation = R::NAME, id = %id, "replacing member with duplicate id");
            if let Some(entity) = members.get_mut(other) {
                entity.owner_mut().clear();
            }
            Some(other)
        }
        _ => None,
    };

    if let Some(previous_owner) = previous.filter(|&p| p != owner) {
        if let Some(entity) = owners.get_mut(previous_owner) {
            entity.members_mut().remove_entry(&id, member);
        }
    }

    owners[owner].members_mut().insert(&id, member);
    members[member].owner_mut().set(owner);
    trace!(relation = R::NAME, id = %id, "member linked");

    Ok(evicted)
}

/// Unlinks a member from `owner` and clears its back reference.
///
/// Returns the removed member's key, or `None` when `owner` does not hold it.
pub fn remove<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    owner: R::Owner,
    target: MemberRef<'_, R::Member>,
) -> Option<R::Member>
where
    R: Relation,
    O: Owner<R>,
    M: Member<R> + Identified,
{
    let owner_entity = owners.get_mut(owner)?;
    let (id, key) = match target {
        MemberRef::Key(key) => (members.get(key)?.id().to_string(), key),
        MemberRef::Id(id) => (id.to_string(), owner_entity.members().get(id)?),
    };

    if !owner_entity.members_mut().remove_entry(&id, key) {
        return None;
    }

    if let Some(entity) = members.get_mut(key) {
        if entity.owner().get() == Some(owner) {
            entity.owner_mut().clear();
        }
    }
    trace!(relation = R::NAME, id = %id, "member unlinked");

    Some(key)
}

/// Membership test by key or by id.
pub fn contains<R, O, M>(
    owners: &SlotMap<R::Owner, O>,
    members: &SlotMap<R::Member, M>,
    owner: R::Owner,
    target: MemberRef<'_, R::Member>,
) -> bool
where
    R: Relation,
    O: Owner<R>,
    M: Identified,
{
    let Some(owner_entity) = owners.get(owner) else {
        return false;
    };
    match target {
        MemberRef::Key(key) => members
            .get(key)
            .is_some_and(|entity| owner_entity.members().get(entity.id()) == Some(key)),
        MemberRef::Id(id) => owner_entity.members().contains_id(id),
    }
}

/// The `belongs_to` setter: points `member` at `owner`, or detaches it when `owner` is `None`.
///
/// Returns the member evicted from the new owner's collection, if any.
pub fn set_owner<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    member: R::Member,
    owner: Option<R::Owner>,
    policy: DuplicateIdPolicy,
) -> Result<Option<R::Member>, MapperError>
where
    R: Relation,
    O: Owner<R>,
    M: Member<R> + Identified,
{
    let current = members
        .get(member)
        .ok_or(MapperError::DanglingMember { relation: R::NAME })?
        .owner()
        .get();

    if current == owner {
        return Ok(None);
    }

    match owner {
        Some(owner) => add::<R, O, M>(owners, members, owner, member, policy),
        None => {
            if let Some(previous) = current {
                remove::<R, O, M>(owners, members, previous, MemberRef::Key(member));
            }
            members[member].owner_mut().clear();
            Ok(None)
        }
    }
}

/// The `has_n` bulk writer: makes `new_members` the exact membership of `owner`.
///
/// Current members absent from `new_members` are unlinked. Everything is validated
/// before the first change is made.
///
/// # Return
///
/// The keys of all members that lost their link to `owner`.
pub fn replace<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    owner: R::Owner,
    new_members: &[R::Member],
    policy: DuplicateIdPolicy,
) -> Result<Vec<R::Member>, MapperError>
where
    R: Relation,
    O: Owner<R>,
    M: Member<R> + Identified,
{
    if !owners.contains_key(owner) {
        return Err(MapperError::DanglingOwner { relation: R::NAME });
    }

    let mut seen_ids = HashSet::new();
    for &key in new_members {
        let entity = members
            .get(key)
            .ok_or(MapperError::DanglingMember { relation: R::NAME })?;
        if entity.id().is_empty() {
            return Err(MapperError::MissingId { relation: R::NAME });
        }
        if !seen_ids.insert(entity.id()) && policy == DuplicateIdPolicy::Reject {
            return Err(MapperError::DuplicateId {
                relation: R::NAME,
                id: entity.id().to_string(),
            });
        }
    }

    let keep: HashSet<R::Member> = new_members.iter().copied().collect();
    let mut dropped: Vec<R::Member> = owners[owner]
        .members()
        .keys()
        .filter(|key| !keep.contains(key))
        .collect();

    for &key in &dropped {
        remove::<R, O, M>(owners, members, owner, MemberRef::Key(key));
    }
    for &key in new_members {
        if let Some(evicted) =
            add::<R, O, M>(owners, members, owner, key, DuplicateIdPolicy::Overwrite)?
        {
            dropped.push(evicted);
        }
    }

    Ok(dropped)
}

/// The `has_one` setter: makes `member` the single partner of `owner`.
///
/// The previous partner of `owner` and the previous owner of `member` are both
/// unlinked. Passing `None` detaches the current partner.
///
/// Returns the partner `owner` held before the call.
pub fn attach_one<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    owner: R::Owner,
    member: Option<R::Member>,
) -> Result<Option<R::Member>, MapperError>
where
    R: Relation,
    O: SingleOwner<R>,
    M: Member<R>,
{
    let current = owners
        .get(owner)
        .ok_or(MapperError::DanglingOwner { relation: R::NAME })?
        .slot()
        .get();
    if let Some(key) = member {
        if !members.contains_key(key) {
            return Err(MapperError::DanglingMember { relation: R::NAME });
        }
    }

    if current == member {
        return Ok(current);
    }

    if let Some(old) = current {
        if let Some(entity) = members.get_mut(old) {
            entity.owner_mut().clear();
        }
    }

    match member {
        Some(key) => {
            let previous = members[key].owner().get();
            if let Some(previous_owner) = previous.filter(|&p| p != owner) {
                if let Some(entity) = owners.get_mut(previous_owner) {
                    entity.slot_mut().clear();
                }
            }
            owners[owner].slot_mut().set(key);
            members[key].owner_mut().set(owner);
        }
        None => {
            owners[owner].slot_mut().clear();
        }
    }
    trace!(relation = R::NAME, "single partner replaced");

    Ok(current)
}

/// The `belongs_to` setter for the member side of a `has_one` relation.
pub fn set_single_owner<R, O, M>(
    owners: &mut SlotMap<R::Owner, O>,
    members: &mut SlotMap<R::Member, M>,
    member: R::Member,
    owner: Option<R::Owner>,
) -> Result<(), MapperError>
where
    R: Relation,
    O: SingleOwner<R>,
    M: Member<R>,
{
    let current = members
        .get(member)
        .ok_or(MapperError::DanglingMember { relation: R::NAME })?
        .owner()
        .get();

    if current == owner {
        return Ok(());
    }

    match owner {
        Some(owner) => {
            attach_one::<R, O, M>(owners, members, owner, Some(member))?;
        }
        None => {
            if let Some(previous) = current.filter(|&p| owners.contains_key(p)) {
                attach_one::<R, O, M>(owners, members, previous, None)?;
            }
            members[member].owner_mut().clear();
        }
    }
    Ok(())
}
