use std::cell::RefCell;
use std::rc::Rc;

use boomplot::data::axis_link::{AxisRange, LinkedAxisGroup, PlotView, ViewRect, YScale};
use boomplot::data::axis_link::ViewId;
use boomplot::LinkError;

fn group_with_members(n: usize) -> (LinkedAxisGroup, Vec<ViewId>) {
    let mut group = LinkedAxisGroup::new(PlotView::new("Altitude", Some("m"), 1.0));
    let ids = (0..n)
        .map(|i| group.add_member(PlotView::new(format!("member {i}"), None, 1.0)))
        .collect();
    (group, ids)
}

#[test]
fn linked_members_follow_every_resize() {
    let (mut group, ids) = group_with_members(3);
    for id in &ids {
        group.link(*id).unwrap();
    }
    for i in 1..=20 {
        let rect = ViewRect::new(10.0, 20.0, 100.0 + i as f32 * 7.5, 300.0 - i as f32);
        assert!(group.on_reference_resized(rect));
        for id in &ids {
            assert_eq!(group.view(*id).unwrap().geometry, rect);
        }
        assert!(group.is_consistent());
    }
}

#[test]
fn unchanged_geometry_is_not_propagated() {
    let (mut group, ids) = group_with_members(1);
    group.link(ids[0]).unwrap();
    let rect = ViewRect::new(0.0, 0.0, 50.0, 50.0);
    assert!(group.on_reference_resized(rect));
    assert!(!group.on_reference_resized(rect));
}

#[test]
fn unlinked_member_keeps_its_geometry() {
    let (mut group, ids) = group_with_members(2);
    group.link(ids[0]).unwrap();
    group.on_reference_resized(ViewRect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(group.view(ids[1]).unwrap().geometry, ViewRect::default());
    assert!(!group.is_linked(ids[1]));
    // frame only carries linked members
    assert_eq!(group.frame().members.len(), 1);
    assert!(group.is_consistent());
}

#[test]
fn linking_syncs_immediately() {
    let (mut group, ids) = group_with_members(1);
    let rect = ViewRect::new(5.0, 5.0, 200.0, 100.0);
    group.on_reference_resized(rect);
    group.set_x_range(AxisRange::new(-2.0, 3.0));
    group.link(ids[0]).unwrap();
    let v = group.view(ids[0]).unwrap();
    assert_eq!(v.geometry, rect);
    assert_eq!(v.x_range, AxisRange::new(-2.0, 3.0));
}

#[test]
fn reference_cannot_link_to_itself() {
    let (mut group, _) = group_with_members(0);
    assert_eq!(group.link(ViewId::REFERENCE), Err(LinkError::SelfLink(ViewId::REFERENCE)));
}

#[test]
fn subscribers_see_each_change() {
    let (mut group, _) = group_with_members(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    group.subscribe(Box::new(move |rect, _| sink.borrow_mut().push(*rect)));
    group.on_reference_resized(ViewRect::new(0.0, 0.0, 1.0, 1.0));
    group.on_reference_resized(ViewRect::new(0.0, 0.0, 2.0, 2.0));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[2], ViewRect::new(0.0, 0.0, 2.0, 2.0));
}

#[test]
fn autorange_fits_from_zero_with_headroom() {
    let mut group = LinkedAxisGroup::new(PlotView::new("Mach", None, 1.5));
    group.autorange(ViewId::REFERENCE, &[0.0, 2.0, 4.0]);
    assert_eq!(group.view(ViewId::REFERENCE).unwrap().y_range, AxisRange::new(0.0, 6.0));
    group.autorange(ViewId::REFERENCE, &[]);
    assert_eq!(group.view(ViewId::REFERENCE).unwrap().y_range, AxisRange::DEFAULT);
    group.autorange(ViewId::REFERENCE, &[-3.0, -1.0]);
    assert_eq!(group.view(ViewId::REFERENCE).unwrap().y_range, AxisRange::DEFAULT);
}

#[test]
fn shared_scale_copies_leader_range() {
    let (mut group, ids) = group_with_members(2);
    group.share_y_scale(ids[1], ids[0]).unwrap();
    assert_eq!(group.view(ids[1]).unwrap().y_scale(), YScale::SharedWith(ids[0]));
    group.autorange(ids[0], &[10.0]);
    group.autorange(ids[1], &[1000.0]);
    group.resolve_shared_scales();
    assert_eq!(group.view(ids[1]).unwrap().y_range, AxisRange::new(0.0, 10.0));
}

#[test]
fn shared_scale_chains_and_self_links_are_rejected() {
    let (mut group, ids) = group_with_members(3);
    group.share_y_scale(ids[1], ids[0]).unwrap();
    assert_eq!(group.share_y_scale(ids[2], ids[1]), Err(LinkError::ChainedScale(ids[1])));
    assert_eq!(group.share_y_scale(ids[2], ids[2]), Err(LinkError::SelfLink(ids[2])));
}

#[test]
fn leader_cannot_become_a_follower() {
    let (mut group, ids) = group_with_members(3);
    group.share_y_scale(ids[0], ids[1]).unwrap();
    assert_eq!(group.share_y_scale(ids[1], ids[2]), Err(LinkError::ChainedScale(ids[1])));
    assert_eq!(group.view(ids[1]).unwrap().y_scale(), YScale::Auto { headroom: 1.0 });

    group.autorange(ids[1], &[100.0]);
    group.resolve_shared_scales();
    assert_eq!(group.view(ids[0]).unwrap().y_range, AxisRange::new(0.0, 100.0));
}

#[test]
fn normalize_round_trips_through_range() {
    let r = AxisRange::new(0.0, 8.0);
    assert_eq!(r.normalize(2.0), 0.25);
    assert_eq!(r.denormalize(0.25), 2.0);
}
