/*!
Instant-runoff counting of ranked ballots.

Each ballot ranks some candidates, 1 being the most preferred. The count
looks at the first choices of every ballot. As long as no candidate holds a
strict majority of them, the weakest candidate is eliminated and the ballots
that ranked it first move to their next choice. Ties for the last position
are broken by looking at the second choices, then the third, and so on.

```
use instant_runoff::*;

let mut election = ElectionState::default();
election.add_preferences(&[Preference::new("Alice", 1), Preference::new("Bob", 2)])?;
election.add_preferences(&[Preference::new("Alice", 1)])?;
election.add_preferences(&[Preference::new("Bob", 1)])?;
election.add_preferences(&[Preference::new("Charlie", 1), Preference::new("Alice", 2)])?;

// 2 first choices out of 4 is not a majority: Charlie is eliminated first.
assert_eq!(election.count_at_rank(1)["Alice"], 2);
assert_eq!(election.winner()?, vec!["Alice".to_string()]);
assert_eq!(election.nth_candidate(2)?, vec!["Bob".to_string()]);
# Ok::<(), VotingError>(())
```

The long-form documentation of the `irvtab` program is in the [manual].
*/

mod ballot;
mod config;
mod election;
pub mod manual;
pub mod quick_start;
pub mod rounds;

pub use crate::ballot::*;
pub use crate::config::*;
pub use crate::election::*;
