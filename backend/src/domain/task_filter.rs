//! Role-scoped task visibility and score aggregation.

use super::{Role, Task, UserId};

/// Keep the tasks `user` may ask about under `role`, preserving input order.
///
/// - [`Role::Delegatee`]: tasks listing the user as a delegatee.
/// - [`Role::Delegator`]: tasks whose delegator is the user.
/// - [`Role::Boss`]: tasks matching either rule, each kept once.
///
/// An empty result is a valid outcome, not an error.
///
/// # Examples
/// ```
/// use delegation_backend::domain::{Role, Task, UserId, UserRef, filter_tasks_for};
///
/// let me = UserId::new("u1").expect("id");
/// let mine = Task { delegator: Some(UserRef::new("u1")), ..Task::default() };
/// let theirs = Task { delegator: Some(UserRef::new("u2")), ..Task::default() };
///
/// let visible = filter_tasks_for(vec![mine.clone(), theirs], &me, Role::Delegator);
/// assert_eq!(visible, vec![mine]);
/// ```
#[must_use]
pub fn filter_tasks_for(tasks: Vec<Task>, user: &UserId, role: Role) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| is_visible(task, user, role))
        .collect()
}

fn is_visible(task: &Task, user: &UserId, role: Role) -> bool {
    match role {
        Role::Delegatee => task.is_delegated_to(user),
        Role::Delegator => task.is_delegated_by(user),
        Role::Boss => task.is_delegated_to(user) || task.is_delegated_by(user),
    }
}

/// Sum of numeric scores; missing and non-numeric scores count as zero.
#[must_use]
pub fn total_score(tasks: &[Task]) -> f64 {
    tasks.iter().map(|task| task.score.numeric_value()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Score, UserRef};
    use rstest::{fixture, rstest};

    const ME: &str = "64b7f0c2e1a4";

    fn task(title: &str, delegatees: &[&str], delegator: Option<&str>) -> Task {
        Task {
            title: Some(title.to_owned()),
            delegatees: delegatees.iter().copied().map(UserRef::new).collect(),
            delegator: delegator.map(UserRef::new),
            ..Task::default()
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().filter_map(|task| task.title.as_deref()).collect()
    }

    #[fixture]
    fn me() -> UserId {
        UserId::new(ME).expect("valid id")
    }

    #[fixture]
    fn tasks() -> Vec<Task> {
        vec![
            task("assigned to me", &[ME, "other"], Some("boss")),
            task("delegated by me", &["other"], Some(ME)),
            task("self assigned", &[ME], Some(ME)),
            task("unrelated", &["other"], Some("boss")),
            task("orphan", &[], None),
        ]
    }

    #[rstest]
    #[case(Role::Delegatee, vec!["assigned to me", "self assigned"])]
    #[case(Role::Delegator, vec!["delegated by me", "self assigned"])]
    #[case(Role::Boss, vec!["assigned to me", "delegated by me", "self assigned"])]
    fn keeps_tasks_visible_to_role(
        me: UserId,
        tasks: Vec<Task>,
        #[case] role: Role,
        #[case] expected: Vec<&str>,
    ) {
        let visible = filter_tasks_for(tasks, &me, role);
        assert_eq!(titles(&visible), expected);
    }

    #[rstest]
    #[case(Role::Delegatee)]
    #[case(Role::Delegator)]
    #[case(Role::Boss)]
    fn output_is_an_ordered_subset_of_input(me: UserId, tasks: Vec<Task>, #[case] role: Role) {
        let visible = filter_tasks_for(tasks.clone(), &me, role);
        let mut remaining = tasks.iter();
        for kept in &visible {
            assert!(
                remaining.any(|candidate| candidate == kept),
                "filtered task must come from the input in order"
            );
        }
    }

    #[rstest]
    fn delegatee_never_matches_through_delegator(me: UserId) {
        let only_delegated_by_me = vec![task("mine", &["other"], Some(ME))];
        assert!(filter_tasks_for(only_delegated_by_me, &me, Role::Delegatee).is_empty());
    }

    #[rstest]
    fn boss_keeps_task_matching_both_rules_once(me: UserId) {
        let visible = filter_tasks_for(vec![task("both", &[ME, ME], Some(ME))], &me, Role::Boss);
        assert_eq!(visible.len(), 1);
    }

    #[rstest]
    fn empty_input_yields_empty_output(me: UserId) {
        assert!(filter_tasks_for(Vec::new(), &me, Role::Boss).is_empty());
    }

    #[rstest]
    fn total_ignores_non_numeric_scores() {
        let scored = [
            Score::Numeric(5.0),
            Score::Other("bad".to_owned()),
            Score::Numeric(3.0),
            Score::Missing,
        ]
        .into_iter()
        .map(|score| Task {
            score,
            ..Task::default()
        })
        .collect::<Vec<_>>();

        assert_eq!(total_score(&scored), 8.0);
    }

    #[rstest]
    fn total_of_nothing_is_zero() {
        assert_eq!(total_score(&[]), 0.0);
    }
}
