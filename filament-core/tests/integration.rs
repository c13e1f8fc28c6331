//! Integration Tests for the Rendering Engine
//!
//! These tests drive full render passes through the public API with the
//! in-memory host and verify the engine's observable guarantees: host-node
//! reuse across renders, replacement on type change, recursive removal,
//! traversal completeness, and yield correctness.

use filament_core::element::{AttrValue, Element};
use filament_core::error::RenderError;
use filament_core::host::{MemoryHost, MemoryNodeId};
use filament_core::render::{Progress, Renderer, StepBudget, Unbounded};

/// The `i`-th attached child of `parent`.
fn child(renderer: &Renderer<MemoryHost>, parent: MemoryNodeId, i: usize) -> MemoryNodeId {
    renderer.host().children(parent)[i]
}

/// Drive the in-flight pass with a fresh single-step budget per idle
/// slot, counting the slots it took.
fn drive_stepwise(renderer: &mut Renderer<MemoryHost>) -> usize {
    let mut slots = 0;
    loop {
        slots += 1;
        match renderer.work(&mut StepBudget::new(1)).expect("step pass") {
            Progress::Committed => return slots,
            Progress::Yielded => continue,
            Progress::Idle => panic!("no pass in flight"),
        }
    }
}

/// Initial render of the worked example: `div > span > "hi"`.
#[test]
fn initial_render_builds_the_host_tree() {
    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();

    let tree = Element::new("div", vec![Element::new("span", vec![Element::text("hi")])]);
    renderer.render_blocking(container, tree).expect("first render");

    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div><span>hi</span></div></root>"
    );
    // One container per element, one leaf for the text.
    assert_eq!(renderer.host().stats.containers_created, 2);
    assert_eq!(renderer.host().stats.leaves_created, 1);
}

/// Re-rendering an identical tree must not create, attach, or remove any
/// host node, and an unchanged tree needs no property syncs either.
#[test]
fn rerender_of_identical_tree_touches_nothing() {
    let tree = || {
        Element::new(
            "div",
            vec![
                Element::new("span", vec![Element::text("hi")]).attr("class", "greeting"),
                Element::new("span", vec![Element::text("there")]),
            ],
        )
    };

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();
    renderer.render_blocking(container, tree()).expect("first render");
    let before = renderer.host().render_to_string(container);

    renderer.host_mut().stats.reset();
    renderer.render_blocking(container, tree()).expect("second render");

    let stats = renderer.host().stats;
    assert_eq!(stats.nodes_created(), 0);
    assert_eq!(stats.appends, 0);
    assert_eq!(stats.removes, 0);
    assert_eq!(stats.prop_syncs, 0);
    assert_eq!(renderer.host().render_to_string(container), before);
}

/// Changing only a child's text value reuses the host nodes at that
/// position and updates the text in place: the rest of the example
/// scenario.
#[test]
fn text_change_reuses_nodes_and_updates_in_place() {
    let tree = |msg: &str| {
        Element::new("div", vec![Element::new("span", vec![Element::text(msg)])])
    };

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();
    renderer.render_blocking(container, tree("hi")).expect("first render");

    let div = child(&renderer, container, 0);
    let span = child(&renderer, div, 0);
    let text = child(&renderer, span, 0);

    renderer.host_mut().stats.reset();
    renderer.render_blocking(container, tree("bye")).expect("second render");

    // Identical structure, same nodes, only the text payload synced.
    let stats = renderer.host().stats;
    assert_eq!(stats.nodes_created(), 0);
    assert_eq!(stats.appends, 0);
    assert_eq!(stats.removes, 0);
    assert_eq!(stats.prop_syncs, 1);

    assert_eq!(child(&renderer, container, 0), div);
    assert_eq!(child(&renderer, div, 0), span);
    assert_eq!(child(&renderer, span, 0), text);
    assert_eq!(renderer.host().text(text), Some("bye"));
    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div><span>bye</span></div></root>"
    );
}

/// Changing a child's element type replaces the host node: the new node
/// is attached, the old one removed from the host tree.
#[test]
fn type_change_replaces_the_host_node() {
    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();

    let first = Element::new("div", vec![Element::new("span", vec![Element::text("x")])]);
    renderer.render_blocking(container, first).expect("first render");
    let div = child(&renderer, container, 0);
    let old_span = child(&renderer, div, 0);

    renderer.host_mut().stats.reset();
    let second = Element::new("div", vec![Element::new("p", vec![Element::text("x")])]);
    renderer.render_blocking(container, second).expect("second render");

    let new_p = child(&renderer, div, 0);
    assert_ne!(new_p, old_span);
    assert_eq!(renderer.host().tag(new_p), Some("p"));
    assert!(!renderer.host().contains(container, old_span));
    assert!(renderer.host().contains(container, new_p));
    // The span's text child had no same-typed match left, so it was
    // recreated under the p rather than moved.
    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div><p>x</p></div></root>"
    );
}

/// Dropping a child removes its entire subtree, descendants before the
/// node itself, and leaves its siblings untouched.
#[test]
fn removed_child_subtree_is_deleted_recursively() {
    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();

    let first = Element::new(
        "div",
        vec![
            Element::new("ul", vec![Element::text("keep")]),
            Element::new("section", vec![Element::new("p", vec![Element::text("bye")])]),
        ],
    );
    renderer.render_blocking(container, first).expect("first render");
    let div = child(&renderer, container, 0);
    let ul = child(&renderer, div, 0);
    let section = child(&renderer, div, 1);

    renderer.host_mut().stats.reset();
    let second = Element::new("div", vec![Element::new("ul", vec![Element::text("keep")])]);
    renderer.render_blocking(container, second).expect("second render");

    // section, p, and the text leaf each detached; ul untouched.
    let stats = renderer.host().stats;
    assert_eq!(stats.removes, 3);
    assert_eq!(stats.nodes_created(), 0);
    assert!(!renderer.host().contains(container, section));
    assert_eq!(child(&renderer, div, 0), ul);
    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div><ul>keep</ul></div></root>"
    );
}

/// The walk visits each element node exactly once (plus the synthetic
/// root), no matter how many idle slots the pass is split across.
#[test]
fn traversal_visits_every_fiber_exactly_once() {
    // 1 div + 3 sections of (h2 + text) = 1 + 3 * 3 = 10 element nodes.
    let tree = || {
        Element::new(
            "div",
            vec![
                Element::new("section", vec![Element::new("h2", vec![]), Element::text("a")]),
                Element::new("section", vec![Element::new("h2", vec![]), Element::text("b")]),
                Element::new("section", vec![Element::new("h2", vec![]), Element::text("c")]),
            ],
        )
    };
    let element_count = 10;

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();
    renderer.render(container, tree()).expect("begin pass");
    drive_stepwise(&mut renderer);
    assert_eq!(renderer.units_of_work(), element_count + 1);

    // Same count when the pass is never interrupted.
    let mut uninterrupted = Renderer::new(MemoryHost::new());
    let container = uninterrupted.host_mut().create_root();
    uninterrupted.render_blocking(container, tree()).expect("render");
    assert_eq!(uninterrupted.units_of_work(), element_count + 1);
}

/// Yielding after every single unit of work produces exactly the same
/// host tree as an unbounded run, across an initial render and an update.
#[test]
fn single_step_yields_match_unbounded_output() {
    let first = || {
        Element::new(
            "div",
            vec![
                Element::new("span", vec![Element::text("one")]),
                Element::new("span", vec![Element::text("two")]),
            ],
        )
    };
    let second = || {
        Element::new(
            "div",
            vec![
                Element::new("span", vec![Element::text("one")]),
                Element::new("p", vec![Element::text("swapped")]),
            ],
        )
    };

    let mut stepped = Renderer::new(MemoryHost::new());
    let stepped_container = stepped.host_mut().create_root();
    stepped.render(stepped_container, first()).expect("begin pass");
    drive_stepwise(&mut stepped);
    stepped.render(stepped_container, second()).expect("begin pass");
    drive_stepwise(&mut stepped);

    let mut unbounded = Renderer::new(MemoryHost::new());
    let unbounded_container = unbounded.host_mut().create_root();
    unbounded.render_blocking(unbounded_container, first()).expect("render");
    unbounded.render_blocking(unbounded_container, second()).expect("render");

    assert_eq!(
        stepped.host().render_to_string(stepped_container),
        unbounded.host().render_to_string(unbounded_container)
    );
}

/// A pass must commit before the next one may begin.
#[test]
fn render_while_a_pass_is_in_flight_is_rejected() {
    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();

    renderer
        .render(container, Element::new("div", vec![]))
        .expect("begin pass");
    // Partially drive the pass, then try to start another.
    renderer.work(&mut StepBudget::new(1)).expect("one step");
    let err = renderer
        .render(container, Element::new("p", vec![]))
        .unwrap_err();
    assert!(matches!(err, RenderError::RenderInFlight));

    // The suspended pass still commits normally.
    assert_eq!(renderer.work(&mut Unbounded).expect("resume"), Progress::Committed);
    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div></div></root>"
    );
}

/// Children declared under a text element cannot be hosted; the offending
/// subtree is dropped and the rest of the tree still renders.
#[test]
fn subtree_under_a_text_node_is_dropped_siblings_survive() {
    let mut malformed = Element::text("payload");
    malformed
        .props
        .children
        .push(Element::new("div", vec![Element::text("never")]));

    let tree = Element::new("div", vec![malformed, Element::new("span", vec![])]);

    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();
    renderer.render_blocking(container, tree).expect("render");

    assert_eq!(
        renderer.host().render_to_string(container),
        "<root><div>payload<span></span></div></root>"
    );
}

/// Renderers are fully isolated per root: state from one never leaks
/// into another.
#[test]
fn independent_roots_do_not_share_state() {
    let mut left = Renderer::new(MemoryHost::new());
    let left_container = left.host_mut().create_root();
    let mut right = Renderer::new(MemoryHost::new());
    let right_container = right.host_mut().create_root();

    left.render_blocking(left_container, Element::new("div", vec![Element::text("L")]))
        .expect("left render");
    right
        .render_blocking(right_container, Element::new("p", vec![Element::text("R")]))
        .expect("right render");

    // Each root re-renders against its own baseline.
    left.host_mut().stats.reset();
    left.render_blocking(left_container, Element::new("div", vec![Element::text("L")]))
        .expect("left rerender");
    assert_eq!(left.host().stats.nodes_created(), 0);

    assert_eq!(
        left.host().render_to_string(left_container),
        "<root><div>L</div></root>"
    );
    assert_eq!(
        right.host().render_to_string(right_container),
        "<root><p>R</p></root>"
    );
}

/// Attribute updates flow through as patches: changed values are set,
/// vanished attributes removed.
#[test]
fn attribute_changes_are_patched_on_reuse() {
    let mut renderer = Renderer::new(MemoryHost::new());
    let container = renderer.host_mut().create_root();

    let first = Element::new("div", vec![])
        .attr("id", "app")
        .attr("hidden", true);
    renderer.render_blocking(container, first).expect("first render");
    let div = child(&renderer, container, 0);
    assert_eq!(
        renderer.host().attribute(div, "hidden"),
        Some(&AttrValue::from(true))
    );

    renderer.host_mut().stats.reset();
    let second = Element::new("div", vec![]).attr("id", "main");
    renderer.render_blocking(container, second).expect("second render");

    assert_eq!(child(&renderer, container, 0), div);
    assert_eq!(renderer.host().stats.prop_syncs, 1);
    assert_eq!(
        renderer.host().attribute(div, "id"),
        Some(&AttrValue::from("main"))
    );
    assert_eq!(renderer.host().attribute(div, "hidden"), None);
}
