use famtree_core::{
    delete_member, delete_union, import_json, upsert_member, upsert_union, FamilyDocument,
    FamilyStore, IntegrityError, Member, MemberDraft, RelationshipResolver, SaveMode, UnionDraft,
    MAX_ENTITY_ID,
};

const T0: &str = "2024-01-01T00:00:00.000Z";
const T1: &str = "2024-02-01T00:00:00.000Z";

fn add_member(store: &mut FamilyStore, first: &str, parent: Option<u64>) -> u64 {
    let mut draft = MemberDraft::named(first, "Doe");
    draft.parent_union_id = parent;
    upsert_member(store, &draft, SaveMode::Create, T0).unwrap().id
}

fn add_union(store: &mut FamilyStore, a: u64, b: u64, children: Vec<u64>) -> u64 {
    let draft = UnionDraft::between(a, b).with_children(children);
    upsert_union(store, &draft, SaveMode::Create).unwrap().id
}

fn ids(members: Vec<&Member>) -> Vec<u64> {
    members.into_iter().map(|member| member.id).collect()
}

fn assert_bidirectional(store: &FamilyStore) {
    for member in store.members() {
        if let Some(parent_id) = member.parent_union_id {
            let parent = store
                .union(parent_id)
                .unwrap_or_else(|| panic!("member {} points at missing union", member.id));
            assert!(parent.has_child(member.id));
        }
    }
    for entry in store.unions() {
        for child_id in &entry.children_ids {
            if let Some(child) = store.member(*child_id) {
                assert_eq!(child.parent_union_id, Some(entry.id));
            }
        }
    }
}

#[test]
fn spouse_child_and_delete_scenario() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());
    assert_eq!((a, b, u), (1, 2, 3));

    {
        let resolver = RelationshipResolver::for_document(store.document());
        let member_a = store.member(a).unwrap();
        let member_b = store.member(b).unwrap();
        assert_eq!(ids(resolver.spouses(member_a)), vec![b]);
        assert_eq!(ids(resolver.spouses(member_b)), vec![a]);
    }

    let c = add_member(&mut store, "C", Some(u));
    assert_eq!(c, 4);
    assert_eq!(store.member(c).unwrap().parent_union_id, Some(u));
    assert_eq!(store.union(u).unwrap().children_ids, vec![c]);
    {
        let resolver = RelationshipResolver::for_document(store.document());
        assert_eq!(ids(resolver.parents(store.member(c).unwrap())), vec![a, b]);
        assert_eq!(ids(resolver.children(store.member(a).unwrap())), vec![c]);
    }

    let report = delete_member(&mut store, a);
    assert!(report.removed);
    assert_eq!(report.removed_unions, vec![u]);
    assert_eq!(report.orphaned_children, vec![c]);
    assert!(store.union(u).is_none());
    assert_eq!(store.member(c).unwrap().parent_union_id, None);
    let resolver = RelationshipResolver::for_document(store.document());
    assert!(resolver.parents(store.member(c).unwrap()).is_empty());
    assert_bidirectional(&store);
}

#[test]
fn create_union_claims_initial_children() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let c = add_member(&mut store, "C", None);
    let d = add_member(&mut store, "D", None);

    let u = add_union(&mut store, a, b, vec![c, d, c]);
    assert_eq!(store.union(u).unwrap().children_ids, vec![c, d]);
    assert_eq!(store.member(c).unwrap().parent_union_id, Some(u));
    assert_eq!(store.member(d).unwrap().parent_union_id, Some(u));
    assert_bidirectional(&store);
}

#[test]
fn editing_union_children_updates_back_references() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let c = add_member(&mut store, "C", None);
    let d = add_member(&mut store, "D", None);
    let u = add_union(&mut store, a, b, vec![c]);

    let edited = upsert_union(
        &mut store,
        &UnionDraft::between(a, b).with_children(vec![d]),
        SaveMode::Edit(u),
    )
    .unwrap();

    assert_eq!(edited.id, u);
    assert_eq!(edited.children_ids, vec![d]);
    assert_eq!(store.member(c).unwrap().parent_union_id, None);
    assert_eq!(store.member(d).unwrap().parent_union_id, Some(u));
    assert_eq!(store.unions().len(), 1);
    assert_bidirectional(&store);
}

#[test]
fn union_write_moves_child_from_previous_union() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let e = add_member(&mut store, "E", None);
    let c = add_member(&mut store, "C", None);
    let first = add_union(&mut store, a, b, vec![c]);
    let second = add_union(&mut store, a, e, vec![c]);

    assert!(store.union(first).unwrap().children_ids.is_empty());
    assert_eq!(store.union(second).unwrap().children_ids, vec![c]);
    assert_eq!(store.member(c).unwrap().parent_union_id, Some(second));
    assert_bidirectional(&store);
}

#[test]
fn editing_member_parent_moves_between_unions() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let e = add_member(&mut store, "E", None);
    let first = add_union(&mut store, a, b, Vec::new());
    let second = add_union(&mut store, a, e, Vec::new());
    let c = add_member(&mut store, "C", Some(first));

    let mut draft = MemberDraft::from(store.member(c).unwrap());
    draft.parent_union_id = Some(second);
    let edited = upsert_member(&mut store, &draft, SaveMode::Edit(c), T1).unwrap();

    assert_eq!(edited.parent_union_id, Some(second));
    assert!(store.union(first).unwrap().children_ids.is_empty());
    assert_eq!(store.union(second).unwrap().children_ids, vec![c]);

    draft.parent_union_id = None;
    let detached = upsert_member(&mut store, &draft, SaveMode::Edit(c), T1).unwrap();
    assert_eq!(detached.parent_union_id, None);
    assert!(store.union(second).unwrap().children_ids.is_empty());
    assert_bidirectional(&store);
}

#[test]
fn dangling_parent_union_resolves_to_no_parent() {
    let mut store = FamilyStore::new();
    let c = add_member(&mut store, "C", Some(42));
    assert_eq!(store.member(c).unwrap().parent_union_id, None);
    assert_bidirectional(&store);
}

#[test]
fn timestamps_are_stamped_on_create_and_edit() {
    let mut store = FamilyStore::new();
    let id = add_member(&mut store, "A", None);
    let created = store.member(id).unwrap().clone();
    assert_eq!(created.created_at, T0);
    assert_eq!(created.updated_at, T0);

    let mut draft = MemberDraft::from(&created);
    draft.first_name = "Alma".to_string();
    let edited = upsert_member(&mut store, &draft, SaveMode::Edit(id), T1).unwrap();
    assert_eq!(edited.first_name, "Alma");
    assert_eq!(edited.created_at, T0);
    assert_eq!(edited.updated_at, T1);
    assert_eq!(store.members().len(), 1);
}

#[test]
fn editing_unknown_member_id_inserts_it() {
    let mut store = FamilyStore::new();
    let member = upsert_member(
        &mut store,
        &MemberDraft::named("Late", "Entry"),
        SaveMode::Edit(7),
        T0,
    )
    .unwrap();
    assert_eq!(member.id, 7);
    assert_eq!(store.next_id(), Some(8));
}

#[test]
fn self_referential_writes_are_rejected_without_changes() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());
    let before = store.clone();

    let self_union = upsert_union(&mut store, &UnionDraft::between(a, a), SaveMode::Create);
    assert!(matches!(
        self_union,
        Err(IntegrityError::SelfUnion { member_id, .. }) if member_id == a
    ));

    let partner_child = upsert_union(
        &mut store,
        &UnionDraft::between(a, b).with_children(vec![b]),
        SaveMode::Edit(u),
    );
    assert_eq!(
        partner_child.unwrap_err(),
        IntegrityError::PartnerListedAsChild {
            union_id: u,
            member_id: b
        }
    );

    let mut own_child = MemberDraft::named("A", "Doe");
    own_child.parent_union_id = Some(u);
    let err = upsert_member(&mut store, &own_child, SaveMode::Edit(a), T1).unwrap_err();
    assert_eq!(
        err,
        IntegrityError::MemberIsPartnerOfParentUnion {
            member_id: a,
            union_id: u
        }
    );

    assert_eq!(store, before);
}

#[test]
fn ids_of_the_other_collection_cannot_be_edited() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());

    let err = upsert_member(&mut store, &MemberDraft::named("X", "Y"), SaveMode::Edit(u), T0)
        .unwrap_err();
    assert_eq!(err, IntegrityError::IdConflict(u));

    let err = upsert_union(&mut store, &UnionDraft::between(a, b), SaveMode::Edit(a)).unwrap_err();
    assert_eq!(err, IntegrityError::IdConflict(a));

    let err = upsert_union(&mut store, &UnionDraft::between(a, b), SaveMode::Edit(0)).unwrap_err();
    assert_eq!(err, IntegrityError::InvalidId(0));
}

#[test]
fn deleting_unknown_member_is_a_noop() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());
    let before = store.clone();

    let report = delete_member(&mut store, 99);
    assert!(!report.removed);
    let report = delete_member(&mut store, u);
    assert!(!report.removed);
    assert_eq!(store, before);
}

#[test]
fn deleting_a_child_strips_it_from_its_union() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());
    let c = add_member(&mut store, "C", Some(u));
    let d = add_member(&mut store, "D", Some(u));

    delete_member(&mut store, c);
    assert_eq!(store.union(u).unwrap().children_ids, vec![d]);
    assert_bidirectional(&store);
}

#[test]
fn delete_union_keeps_children_without_parent() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let u = add_union(&mut store, a, b, Vec::new());
    let c = add_member(&mut store, "C", Some(u));

    assert!(delete_union(&mut store, u));
    assert!(!delete_union(&mut store, u));
    assert_eq!(store.members().len(), 3);
    assert_eq!(store.member(c).unwrap().parent_union_id, None);
}

#[test]
fn invariants_hold_across_mixed_mutation_sequence() {
    let mut store = FamilyStore::new();
    let a = add_member(&mut store, "A", None);
    let b = add_member(&mut store, "B", None);
    let e = add_member(&mut store, "E", None);
    let u1 = add_union(&mut store, a, b, Vec::new());
    let c = add_member(&mut store, "C", Some(u1));
    let d = add_member(&mut store, "D", Some(u1));
    let u2 = add_union(&mut store, b, e, vec![d]);
    let f = add_member(&mut store, "F", Some(u2));
    let g = add_member(&mut store, "G", None);
    let u3 = add_union(&mut store, c, g, vec![f]);
    assert_bidirectional(&store);

    let taken: Vec<u64> = store
        .members()
        .iter()
        .map(|member| member.id)
        .chain(store.unions().iter().map(|entry| entry.id))
        .collect();
    assert!(!taken.contains(&store.next_id().unwrap()));

    delete_member(&mut store, e);
    assert!(store.union(u2).is_none());
    assert_eq!(store.member(d).unwrap().parent_union_id, None);
    assert_eq!(store.member(f).unwrap().parent_union_id, Some(u3));
    assert_bidirectional(&store);

    delete_member(&mut store, c);
    assert!(store.union(u3).is_none());
    assert_eq!(store.member(f).unwrap().parent_union_id, None);
    assert_bidirectional(&store);

    let next = store.next_id().unwrap();
    assert!(store.member(next).is_none());
    assert!(store.union(next).is_none());
}

#[test]
fn creating_past_the_id_ceiling_is_rejected() {
    let mut store = FamilyStore::from_document(FamilyDocument::new(
        vec![Member::new(MAX_ENTITY_ID, "Last", "Id")],
        Vec::new(),
    ));
    let before = store.clone();

    let err = upsert_member(&mut store, &MemberDraft::named("A", "B"), SaveMode::Create, T0)
        .unwrap_err();
    assert_eq!(err, IntegrityError::IdsExhausted);
    let err = upsert_union(
        &mut store,
        &UnionDraft::between(MAX_ENTITY_ID, 1),
        SaveMode::Create,
    )
    .unwrap_err();
    assert_eq!(err, IntegrityError::IdsExhausted);
    assert_eq!(store, before);
}

#[test]
fn ids_above_the_ceiling_cannot_be_edited() {
    let mut store = FamilyStore::new();
    let err = upsert_member(
        &mut store,
        &MemberDraft::named("A", "B"),
        SaveMode::Edit(u64::MAX),
        T0,
    )
    .unwrap_err();
    assert_eq!(err, IntegrityError::InvalidId(u64::MAX));
    assert!(store.is_empty());
}

#[test]
fn imported_huge_id_never_reaches_the_store() {
    let text = r#"{"members": [
        {"id": 18446744073709551615, "firstName": "A", "lastName": "B"},
        {"id": 2, "firstName": "C", "lastName": "D"}
    ], "unions": []}"#;
    let report = import_json(text).unwrap();
    assert_eq!(report.skipped_members, 1);

    let mut store = FamilyStore::from_document(report.document);
    let created = upsert_member(&mut store, &MemberDraft::named("E", "F"), SaveMode::Create, T0)
        .unwrap();
    assert_eq!(created.id, 3);
}
