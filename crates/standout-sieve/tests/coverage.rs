//! Integration coverage of the public API.

use std::cell::Cell;
use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::sync::Arc;

use standout_sieve::{
    every, excludes, excludes_indices, includes, includes_indices, includes_members, predicate,
    AllElementsFilter, And, AndElements, Collector, Container, DiscardAll, ElementsFilter,
    ElementsFilterExt, Filter, FilterError, FilterPipe, FilterState, FilterStream, KeepAll,
    KeptAllElements, KeptNoElements, KeptSomeElements, LengthFilter, Matches, Nested,
    NoDuplicates, Not, NotElements, OrElements, Quantifier, StreamState, StringElementsFilter,
    Traversal, XorElements,
};

// ============================================================================
// Test helpers
// ============================================================================

/// Routes the library's log events to the test output.
///
/// Set `RUST_LOG=standout_sieve=trace` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

fn negative() -> impl Filter<i32> {
    predicate(|n: &i32| *n < 0)
}

fn positive() -> impl Filter<i32> {
    predicate(|n: &i32| *n > 0)
}

fn even() -> impl Filter<i32> {
    predicate(|n: &i32| n % 2 == 0)
}

/// Keeps positive numbers and panics on 3.
fn explosive() -> impl Filter<i32> {
    predicate(|n: &i32| {
        if *n == 3 {
            panic!("qualifier exploded");
        }
        *n > 0
    })
}

/// Records how a session was driven.
#[derive(Debug, Default)]
struct Recording {
    starts: usize,
    fed: Vec<(i32, FilterState)>,
    ends: usize,
}

impl FilterStream<i32> for Recording {
    fn start(&mut self) -> standout_sieve::Result<FilterState> {
        self.starts += 1;
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, element: &i32, verdict: FilterState) -> standout_sieve::Result<StreamState> {
        self.fed.push((*element, verdict));
        Ok(StreamState::Continue)
    }

    fn end(&mut self, last: FilterState) -> standout_sieve::Result<FilterState> {
        self.ends += 1;
        Ok(last)
    }
}

/// A stream that fails on the first element.
struct Failing;

impl FilterStream<i32> for Failing {
    fn start(&mut self) -> standout_sieve::Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(
        &mut self,
        _element: &i32,
        _verdict: FilterState,
    ) -> standout_sieve::Result<StreamState> {
        Err(FilterError::Stream("refused".to_string()))
    }

    fn end(&mut self, last: FilterState) -> standout_sieve::Result<FilterState> {
        Ok(last)
    }
}

struct FailingPolicy;

impl Quantifier<i32> for FailingPolicy {
    fn stream(&self) -> Box<dyn FilterStream<i32> + '_> {
        Box::new(Failing)
    }
}

// ============================================================================
// Quantifier verdicts
// ============================================================================

#[test]
fn every_even() {
    assert!(every(even()).is_kept(&[2, 4, 6]));
    assert!(!every(even()).is_kept(&[2, 3, 6]));
}

#[test]
fn excludes_negative() {
    assert!(excludes(negative()).is_kept(&[1, 2, 3]));
    assert!(!excludes(negative()).is_kept(&[1, -2, 3]));
}

#[test]
fn empty_container_per_quantifier() {
    let empty: Vec<i32> = Vec::new();
    assert_eq!(every(even()).filter(&empty), FilterState::Kept);
    assert_eq!(includes(even()).filter(&empty), FilterState::Discarded);
    assert_eq!(excludes(even()).filter(&empty), FilterState::Kept);
}

#[test]
fn absent_container_per_quantifier() {
    let absent = None::<&Vec<i32>>;
    assert_eq!(every(even()).filter(absent), FilterState::Discarded);
    assert_eq!(includes(even()).filter(absent), FilterState::Discarded);
    assert_eq!(excludes(even()).filter(absent), FilterState::Discarded);
    assert_eq!(NoDuplicates::new().filter(absent), FilterState::Discarded);
    assert_eq!(LengthFilter::new(0, None).unwrap().filter(absent), FilterState::Discarded);
}

// ============================================================================
// Short-circuiting
// ============================================================================

#[test]
fn lazy_sequence_stops_at_first_violation() {
    init_tracing();
    let visited = Cell::new(0);
    let values = [1, -2, 3, 4, 5];
    let sequence =
        Container::sequence(values.iter().inspect(|_| visited.set(visited.get() + 1)));

    assert_eq!(excludes(negative()).filter(sequence), FilterState::Discarded);
    assert_eq!(visited.get(), 2);
}

#[test]
fn lazy_sequence_stops_at_first_keeper() {
    let visited = Cell::new(0);
    let values = [-1, 2, 3, 4];
    let sequence =
        Container::sequence(values.iter().inspect(|_| visited.set(visited.get() + 1)));

    assert_eq!(includes(positive()).filter(sequence), FilterState::Kept);
    assert_eq!(visited.get(), 2);
}

#[test]
fn observer_walks_the_whole_container() {
    let visited = Cell::new(0);
    let values = [1, -2, 3, 4, 5];
    let sequence =
        Container::sequence(values.iter().inspect(|_| visited.set(visited.get() + 1)));

    let mut recording = Recording::default();
    let verdict = excludes(negative()).filter_with(sequence, &mut recording);

    assert_eq!(verdict, FilterState::Discarded);
    assert_eq!(visited.get(), 5);
    assert_eq!(recording.fed.len(), 5);
    assert_eq!(recording.fed[1], (-2, FilterState::Kept));
}

#[test]
fn quantifier_only_traversal_leaves_observer_a_prefix() {
    let mut recording = Recording::default();
    let verdict = excludes(negative())
        .traversal(Traversal::QuantifierOnly)
        .filter_with(&[1, -2, 3, 4, 5], &mut recording);

    assert_eq!(verdict, FilterState::Discarded);
    assert_eq!(recording.fed.len(), 2);
    assert_eq!(recording.ends, 1);
}

#[test]
fn observer_session_is_started_and_ended_once() {
    let mut recording = Recording::default();
    every(even()).filter_with(&[2, 3], &mut recording);
    assert_eq!(recording.starts, 1);
    assert_eq!(recording.ends, 1);

    let mut recording = Recording::default();
    every(even()).filter_with(&Vec::<i32>::new(), &mut recording);
    assert_eq!(recording.starts, 1);
    assert!(recording.fed.is_empty());
    assert_eq!(recording.ends, 1);
}

#[test]
fn collector_limit_lets_the_walk_stop() {
    let visited = Cell::new(0);
    let values = [1, 2, -3, 4, 5, 6];
    let sequence =
        Container::sequence(values.iter().inspect(|_| visited.set(visited.get() + 1)));

    let mut first_two = Collector::discards().limit(2);
    let verdict = excludes(negative()).filter_with(sequence, &mut first_two);

    assert_eq!(verdict, FilterState::Discarded);
    assert_eq!(first_two.discarded(), &[1, 2]);
    assert_eq!(visited.get(), 3);
}

// ============================================================================
// Observers
// ============================================================================

#[test]
fn keepers_and_discards() {
    let values = [-3, 3, -2, 2, -1, 1, 0];
    assert_eq!(includes(positive()).keepers(&values), vec![3, 2, 1]);
    assert_eq!(includes(positive()).discards(&values), vec![-3, -2, -1, 0]);
    assert_eq!(every(positive()).keepers(&values), vec![3, 2, 1]);
}

#[test]
fn collector_split() {
    let mut collector = Collector::both();
    AllElementsFilter::new(even()).filter_with(&[1, 2, 3, 4], &mut collector);
    let (kept, discarded) = collector.into_parts();
    assert_eq!(kept, vec![2, 4]);
    assert_eq!(discarded, vec![1, 3]);
}

#[test]
fn chained_pipe_feeds_streams_in_order() {
    let mut pipe = FilterPipe::chain([Collector::keepers(), Collector::discards()]);
    pipe.start().unwrap();
    for (n, verdict) in [(1, FilterState::Kept), (2, FilterState::Discarded)] {
        assert_eq!(pipe.fed(&n, verdict).unwrap(), None);
    }
    pipe.end(FilterState::Kept).unwrap();

    let streams = pipe.into_streams();
    assert_eq!(streams[0].kept(), &[1]);
    assert_eq!(streams[1].discarded(), &[2]);
}

// ============================================================================
// Container shapes
// ============================================================================

#[test]
fn shapes_agree() {
    let array = [1, -2, 3];
    let vec = array.to_vec();
    let deque: VecDeque<i32> = array.into_iter().collect();
    let list: LinkedList<i32> = array.into_iter().collect();
    let tree: BTreeSet<i32> = array.into_iter().collect();
    let hash: HashSet<i32> = array.into_iter().collect();

    for filter in [every(positive()), includes(positive()), excludes(positive())] {
        let expected = filter.filter(&array);
        assert_eq!(filter.filter(&vec), expected);
        assert_eq!(filter.filter(&vec[..]), expected);
        assert_eq!(filter.filter(&deque), expected);
        assert_eq!(filter.filter(&list), expected);
        assert_eq!(filter.filter(&tree), expected);
        assert_eq!(filter.filter(&hash), expected);
        assert_eq!(filter.filter(Container::sequence(array.iter())), expected);
    }
}

#[test]
fn singleton_is_a_one_element_container() {
    let five = 5;
    let minus_five = -5;
    for filter in [every(positive()), includes(positive()), excludes(positive())] {
        assert_eq!(
            filter.filter(Container::single(&five)),
            filter.filter(&[five])
        );
        assert_eq!(
            filter.filter(Container::single(&minus_five)),
            filter.filter(&[minus_five])
        );
    }
    assert!(every(positive()).is_kept(Container::single(&five)));
    assert!(!every(positive()).is_kept(Container::single(&minus_five)));
}

// ============================================================================
// Fail-closed
// ============================================================================

#[test]
fn panicking_qualifier_discards() {
    init_tracing();
    let explosive = predicate(|n: &i32| {
        if *n == 3 {
            panic!("qualifier exploded");
        }
        true
    });
    let filter = every(explosive);
    assert!(filter.is_kept(&[1, 2]));
    assert!(!filter.is_kept(&[1, 2, 3]));
    assert!(!excludes(predicate(|_: &i32| -> bool { panic!("always") })).is_kept(&[1]));
}

#[test]
fn panicking_iterator_discards() {
    init_tracing();
    let values = [1, 2, 3];
    let sequence = Container::sequence(values.iter().inspect(|n| {
        if **n == 2 {
            panic!("iterator exploded");
        }
    }));
    assert!(!every(positive()).is_kept(sequence));
}

#[test]
fn failing_quantifier_discards() {
    init_tracing();
    let filter = AllElementsFilter::new(KeepAll).quantifier(FailingPolicy);
    assert!(!filter.is_kept(&[1]));
    assert!(filter.is_kept(&Vec::<i32>::new()));
}

#[test]
fn failing_observer_discards() {
    init_tracing();
    let mut failing = Failing;
    assert_eq!(
        every(positive()).filter_with(&[1, 2], &mut failing),
        FilterState::Discarded
    );
}

#[test]
fn negated_failure_discards() {
    init_tracing();
    let filter = NotElements::new(every(explosive()));
    assert!(!filter.is_kept(&[1, 2, 3]));
    assert!(!filter.is_kept(&[1, 2]));
    assert!(filter.is_kept(&[1, -2, 3]));

    let refusing = NotElements::new(AllElementsFilter::new(KeepAll).quantifier(FailingPolicy));
    assert!(!refusing.is_kept(&[1]));
}

#[test]
fn xor_with_failing_child_discards() {
    init_tracing();
    let filter = XorElements::new()
        .with(every(explosive()))
        .with(includes(positive()));
    assert!(!filter.is_kept(&[1, 2, 3]));
    assert!(filter.is_kept(&[1, -2]));
    assert!(!filter.is_kept(&[1, 2]));
}

#[test]
fn negated_nested_failure_discards() {
    init_tracing();
    let no_row_all_positive = every(Not::new(Nested::new(every(explosive()))));
    assert!(!no_row_all_positive.is_kept(&[vec![1, 2, 3]]));
    assert!(no_row_all_positive.is_kept(&[vec![-1], vec![1, -2]]));
    assert!(!no_row_all_positive.is_kept(&[vec![-1], vec![1, 2]]));
}

#[test]
fn fallible_entry_point_reports_failures() {
    let refusing = AllElementsFilter::new(KeepAll).quantifier(FailingPolicy);
    assert!(matches!(
        refusing.try_filter_observed(Container::from(&[1]), None),
        Err(FilterError::Stream(_))
    ));
    assert_eq!(
        refusing.try_filter_observed(Container::Absent, None).ok(),
        Some(FilterState::Discarded)
    );
    assert_eq!(refusing.filter(&[1]), FilterState::Discarded);
}

// ============================================================================
// Index filters
// ============================================================================

#[test]
fn includes_indices_one_and_three() {
    let filter = includes_indices([1, 3]).unwrap();
    assert!(filter.is_kept(&[Some("a"), Some("b"), Some("c"), Some("d")]));
    assert!(!filter.is_kept(&[Some("a"), None, Some("c"), Some("d")]));
}

#[test]
fn excludes_indices_zero() {
    let filter = excludes_indices([0]).unwrap();
    assert!(filter.is_kept(&[None, Some(1)]));
    assert!(!filter.is_kept(&[Some(0), None]));
    assert!(filter.is_kept(&Vec::<Option<i32>>::new()));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn value_combinators_as_qualifiers() {
    let positive_even = And::new().with(positive()).with(even());
    assert!(every(positive_even).is_kept(&[2, 4]));
    assert!(excludes(Not::new(KeepAll)).is_kept(&[1, 2]));
    assert!(!includes(DiscardAll).is_kept(&[1, 2]));
}

#[test]
fn container_combinators() {
    let unique_non_empty = AndElements::new()
        .with(NoDuplicates::new())
        .with(LengthFilter::non_empty());
    assert!(unique_non_empty.is_kept(&[1, 2]));
    assert!(!unique_non_empty.is_kept(&Vec::<i32>::new()));

    let either = OrElements::new()
        .with(every(positive()))
        .with(every(negative()));
    assert!(either.is_kept(&[-1, -2]));
    assert!(!either.is_kept(&[-1, 2]));

    let exactly_one = XorElements::new()
        .with(includes(positive()))
        .with(includes(negative()));
    assert!(exactly_one.is_kept(&[1, 2]));
    assert!(!exactly_one.is_kept(&[1, -2]));

    assert!(NotElements::new(includes(negative())).is_kept(&[1, 2]));
}

#[test]
fn nested_containers() {
    let matrix = vec![vec![1, 2], vec![3, 4]];
    assert!(every(Nested::new(every(positive()))).is_kept(&matrix));
    assert!(!includes(Nested::new(includes(negative()))).is_kept(&matrix));
}

#[test]
fn strings_and_patterns() {
    let identifiers = every(Matches::new(r"^[a-z_][a-z0-9_]*$").unwrap());
    assert!(identifiers.is_kept(&["foo", "bar_2"]));
    assert!(!identifiers.is_kept(&["foo", "2bar"]));

    let hex = StringElementsFilter::new(every(predicate(|c: &char| c.is_ascii_hexdigit())));
    assert_eq!(hex.filter("c0ffee"), FilterState::Kept);
    assert_eq!(hex.keeper_chars("coffee"), "cffee");
}

#[test]
fn members() {
    let needs_admin = includes_members(["admin"]).unwrap();
    assert!(needs_admin.is_kept(&["user", "admin"]));
    assert!(!needs_admin.is_kept(&["user"]));
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn filters_are_idempotent() {
    let filter = every(positive());
    let values = [1, 2, -3];
    let sequence = Container::sequence(values.iter());
    let first = filter.filter(sequence.clone());
    for _ in 0..3 {
        assert_eq!(filter.filter(sequence.clone()), first);
    }
}

#[test]
fn filters_are_shared_across_threads() {
    let filter: Arc<dyn ElementsFilter<i32>> = Arc::new(every(positive()));
    std::thread::scope(|scope| {
        for offset in 0..4 {
            let filter = Arc::clone(&filter);
            scope.spawn(move || {
                let values: Vec<i32> = (1..100).map(|n| n + offset).collect();
                assert!(filter.is_kept(&values));
            });
        }
    });
}

#[test]
fn quantifiers_are_reusable_policies() {
    let policy = KeptAllElements;
    let first = AllElementsFilter::new(even()).quantifier(policy);
    let second = AllElementsFilter::new(positive()).quantifier(policy);
    assert!(first.is_kept(&[2]));
    assert!(second.is_kept(&[2]));
    assert!(AllElementsFilter::new(even())
        .quantifier(KeptSomeElements)
        .is_kept(&[1, 2]));
    assert!(AllElementsFilter::new(even())
        .quantifier(KeptNoElements)
        .is_kept(&[1, 3]));
}

#[test]
fn construction_errors() {
    assert!(matches!(
        Matches::new("["),
        Err(FilterError::InvalidRegex(_))
    ));
    assert!(matches!(
        LengthFilter::new(5, Some(1)),
        Err(FilterError::InvalidLengthBounds { min: 5, max: 1 })
    ));
    assert!(matches!(
        includes_indices::<i32>([0, 0]),
        Err(FilterError::DuplicateMember { position: 1 })
    ));
}
