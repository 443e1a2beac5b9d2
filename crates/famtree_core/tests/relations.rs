use famtree_core::relations::{relationship_status, sibling_groups};
use famtree_core::{reconcile, FamilyDocument, Member, RelationshipKind, RelationshipResolver, Union};

fn person(id: u64, first: &str) -> Member {
    Member::new(id, first, "Berg")
}

fn couple(id: u64, a: u64, b: u64, children: Vec<u64>) -> Union {
    let mut entry = Union::new(id, a, b);
    entry.children_ids = children;
    entry
}

fn document(members: Vec<Member>, unions: Vec<Union>) -> FamilyDocument {
    let mut document = FamilyDocument::new(members, unions);
    reconcile(&mut document);
    document
}

/// Three generations with a second marriage and a great-grandchild:
///
/// ```text
/// 1 + 2 (10) -> 3, 5
/// 3 + 4 (11) -> 6, 7
/// 3 + 8 (12) -> 9
/// 6 + 15 (16) -> 17
/// 13 is unrelated
/// ```
fn family() -> FamilyDocument {
    document(
        vec![
            person(1, "Grandpa"),
            person(2, "Grandma"),
            person(3, "Father"),
            person(4, "Mother"),
            person(5, "Aunt"),
            person(6, "Eldest"),
            person(7, "Younger"),
            person(8, "Stepmother"),
            person(9, "Half"),
            person(13, "Stranger"),
            person(15, "InLaw"),
            person(17, "Baby"),
        ],
        vec![
            couple(10, 1, 2, vec![3, 5]),
            couple(11, 3, 4, vec![6, 7]),
            couple(12, 3, 8, vec![9]),
            couple(16, 6, 15, vec![17]),
        ],
    )
}

fn ids(members: Vec<&Member>) -> Vec<u64> {
    members.into_iter().map(|member| member.id).collect()
}

#[test]
fn parents_children_and_spouses() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);
    let member = |id| resolver.member(id).unwrap();

    assert_eq!(ids(resolver.parents(member(6))), vec![3, 4]);
    assert!(resolver.parents(member(1)).is_empty());
    assert_eq!(ids(resolver.children(member(3))), vec![6, 7, 9]);
    assert_eq!(ids(resolver.spouses(member(3))), vec![4, 8]);
    assert_eq!(resolver.member_unions(member(3)).len(), 2);
}

#[test]
fn direct_and_step_siblings() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);
    let member = |id| resolver.member(id).unwrap();

    assert_eq!(ids(resolver.direct_siblings(member(6))), vec![7]);
    assert_eq!(ids(resolver.step_siblings(member(6))), vec![9]);
    assert_eq!(ids(resolver.all_siblings(member(6))), vec![7, 9]);
    assert_eq!(ids(resolver.step_siblings(member(9))), vec![6, 7]);
    assert!(resolver.step_siblings(member(3)).is_empty());
    assert!(resolver.direct_siblings(member(1)).is_empty());
}

#[test]
fn step_siblings_need_exactly_one_shared_partner() {
    let document = document(
        vec![person(1, "A"), person(2, "B"), person(3, "C"), person(4, "D")],
        vec![couple(10, 1, 2, vec![3]), couple(11, 2, 1, vec![4])],
    );
    let resolver = RelationshipResolver::for_document(&document);
    let member = resolver.member(3).unwrap();

    assert!(resolver.step_siblings(member).is_empty());
    assert!(resolver.direct_siblings(member).is_empty());
}

#[test]
fn ancestors_and_descendants_carry_generations() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);

    let ancestors: Vec<(u64, usize)> = resolver
        .ancestors(resolver.member(17).unwrap(), 3)
        .into_iter()
        .map(|relative| (relative.member.id, relative.generation))
        .collect();
    assert_eq!(
        ancestors,
        vec![(6, 1), (15, 1), (3, 2), (4, 2), (1, 3), (2, 3)]
    );

    let descendants: Vec<(u64, usize)> = resolver
        .descendants(resolver.member(1).unwrap(), 2)
        .into_iter()
        .map(|relative| (relative.member.id, relative.generation))
        .collect();
    assert_eq!(descendants, vec![(3, 1), (5, 1), (6, 2), (7, 2), (9, 2)]);

    assert!(resolver.ancestors(resolver.member(17).unwrap(), 0).is_empty());
}

#[test]
fn pedigree_collapse_reports_shared_ancestor_once() {
    // Cousins 6 and 8 share grandparents 1 and 2.
    let document = document(
        (1..=9).map(|id| person(id, "P")).collect(),
        vec![
            couple(10, 1, 2, vec![3, 4]),
            couple(11, 3, 5, vec![6]),
            couple(12, 4, 7, vec![8]),
            couple(13, 6, 8, vec![9]),
        ],
    );
    let resolver = RelationshipResolver::for_document(&document);
    let ancestors = resolver.ancestors(resolver.member(9).unwrap(), 3);

    let ids: Vec<u64> = ancestors.iter().map(|relative| relative.member.id).collect();
    assert_eq!(ids, vec![6, 8, 3, 5, 4, 7, 1, 2]);
    let grandparent = ancestors
        .iter()
        .find(|relative| relative.member.id == 1)
        .unwrap();
    assert_eq!(grandparent.generation, 3);
}

#[test]
fn cyclic_data_terminates() {
    let document = document(
        vec![person(1, "A"), person(2, "B"), person(3, "C"), person(4, "D")],
        vec![couple(10, 1, 3, vec![2]), couple(11, 2, 4, vec![1])],
    );
    let resolver = RelationshipResolver::for_document(&document);
    let member = resolver.member(1).unwrap();

    let ancestors = resolver.ancestors(member, 10);
    let ids: Vec<u64> = ancestors.iter().map(|relative| relative.member.id).collect();
    assert_eq!(ids, vec![2, 4, 3]);
    assert!(resolver.descendants(member, 10).len() <= 3);
}

#[test]
fn relationship_type_classifies_pairs() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);
    let kind = |a, b| {
        resolver.relationship_type(resolver.member(a).unwrap(), resolver.member(b).unwrap())
    };

    assert_eq!(kind(6, 6), RelationshipKind::SelfMember);
    assert_eq!(kind(3, 4), RelationshipKind::Spouse);
    assert_eq!(kind(6, 3), RelationshipKind::Parent);
    assert_eq!(kind(3, 6), RelationshipKind::Child);
    assert_eq!(kind(6, 9), RelationshipKind::Sibling);
    assert_eq!(kind(6, 1), RelationshipKind::Grandparent);
    assert_eq!(kind(17, 1), RelationshipKind::GreatGrandparent);
    assert_eq!(kind(1, 6), RelationshipKind::Grandchild);
    assert_eq!(kind(1, 17), RelationshipKind::GreatGrandchild);
    assert_eq!(kind(5, 6), RelationshipKind::Unrelated);
    assert_eq!(kind(13, 6), RelationshipKind::Unrelated);
    assert_eq!(RelationshipKind::GreatGrandparent.to_string(), "great-grandparent");
}

#[test]
fn family_tree_collects_all_directions() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);
    let tree = resolver.family_tree(resolver.member(6).unwrap(), 2);

    let ancestor_ids: Vec<u64> = tree.ancestors.iter().map(|r| r.member.id).collect();
    assert_eq!(ancestor_ids, vec![3, 4, 1, 2]);
    let descendant_ids: Vec<u64> = tree.descendants.iter().map(|r| r.member.id).collect();
    assert_eq!(descendant_ids, vec![17]);
    assert_eq!(ids(tree.spouses), vec![15]);
    assert_eq!(ids(tree.siblings), vec![7, 9]);
}

#[test]
fn summaries_and_navigation() {
    let document = family();
    let resolver = RelationshipResolver::for_document(&document);

    let summary = resolver.relationship_summary(resolver.member(6).unwrap());
    assert_eq!(summary.parents, 2);
    assert_eq!(summary.children, 1);
    assert_eq!(summary.siblings, 2);
    assert_eq!(summary.direct_siblings, 1);
    assert_eq!(summary.step_siblings, 1);
    assert_eq!(summary.spouses, 1);
    assert!(summary.can_navigate_to_parents);
    assert!(summary.can_navigate_to_children);

    let card = resolver.family_summary(resolver.member(3).unwrap());
    assert_eq!(card.parents, 2);
    assert_eq!(card.children, 3);
    assert_eq!(card.siblings, 1);
    assert_eq!(card.spouses, 2);
    assert_eq!(card.relationship_status, "Multiple relationships (2)");

    let younger = resolver.member(7).unwrap();
    assert!(!resolver.can_navigate_to_children(younger));
    assert_eq!(resolver.family_summary(younger).relationship_status, relationship_status(0));
}

#[test]
fn partner_name_falls_back_for_missing_partner() {
    let document = document(
        vec![person(1, "Solo")],
        vec![couple(10, 1, 99, Vec::new())],
    );
    let resolver = RelationshipResolver::for_document(&document);
    let member = resolver.member(1).unwrap();
    let entry = document.union(10).unwrap();

    assert_eq!(resolver.union_partner_name(entry, member), "Unknown Partner");
    assert!(resolver.spouses(member).is_empty());

    let three_generations = family();
    let resolver = RelationshipResolver::for_document(&three_generations);
    let father = resolver.member(3).unwrap();
    assert_eq!(
        resolver.union_partner_name(three_generations.union(11).unwrap(), father),
        "Mother Berg"
    );
}

#[test]
fn sibling_groups_follow_parent_unions() {
    let document = family();
    let groups = sibling_groups(&document.members);
    let group_ids: Vec<&str> = groups.iter().map(|group| group.id.as_str()).collect();

    assert_eq!(
        group_ids,
        vec!["1", "2", "3-5", "4", "6-7", "8", "9", "13", "15", "17"]
    );
}

#[test]
fn shared_ancestor_takes_the_shorter_line() {
    // 30 is a great-grandparent of 37 through 34 and a grandparent through 36.
    let document = document(
        (30..=37).map(|id| person(id, "P")).collect(),
        vec![
            couple(20, 30, 31, vec![32]),
            couple(21, 32, 33, vec![34]),
            couple(22, 30, 35, vec![36]),
            couple(23, 34, 36, vec![37]),
        ],
    );
    let resolver = RelationshipResolver::for_document(&document);
    let member = resolver.member(37).unwrap();

    let ancestors: Vec<(u64, usize)> = resolver
        .ancestors(member, 3)
        .into_iter()
        .map(|relative| (relative.member.id, relative.generation))
        .collect();
    assert_eq!(
        ancestors,
        vec![(34, 1), (36, 1), (32, 2), (33, 2), (30, 2), (35, 2), (31, 3)]
    );
    assert_eq!(
        resolver.relationship_type(member, resolver.member(30).unwrap()),
        RelationshipKind::Grandparent
    );
}
