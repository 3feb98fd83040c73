//! `cq-agent` — tabular Q-learning advisor for checkout layouts.
//!
//! The agent never touches a live engine.  It is handed a [`QState`]
//! snapshot and a station list, trains against its own crude transition
//! model, and turns the learned values into [`Recommendation`]s.
//!
//! | Module             | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`state`]          | `QState`, bucketed `StateKey`                        |
//! | [`action`]         | `Action`, layout feasibility                         |
//! | [`qtable`]         | sparse Q-table and its statistics                    |
//! | [`reward`]         | reward of a simulated state                          |
//! | [`transition`]     | the simplified training environment                  |
//! | [`recommendation`] | advice built from Q-values                           |
//! | [`agent`]          | `QLearningAgent`: update rule, ε-greedy, training    |
//! | [`trainer`]        | periodic background training on its own thread       |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let mut agent = QLearningAgent::new();
//! let state = QState::observe(&stations, DayType::Weekday, engine.current_time());
//! agent.start_learning(&state, &stations);
//! agent.train_to_completion();
//! for rec in agent.generate_recommendations(&state, &stations) {
//!     println!("{rec}");
//! }
//! ```
//!
//! # Feature flags
//!
//! | Feature | Effect                                    |
//! |---------|-------------------------------------------|
//! | `serde` | Serialize/Deserialize on public types     |

pub mod action;
pub mod agent;
pub mod config;
pub mod error;
pub mod qtable;
pub mod recommendation;
pub mod reward;
pub mod state;
pub mod trainer;
pub mod transition;


pub use action::{Action, Layout};
pub use agent::{ActionRecord, QLearningAgent, MAX_RECOMMENDATIONS, RECOMMENDATION_FLOOR};
pub use config::{LearningConfig, LearningParameters};
pub use error::{AgentError, AgentResult};
pub use qtable::{QTable, QTableStats};
pub use recommendation::{LayoutChange, Priority, Recommendation, RecommendationKind};
pub use reward::{reward, RewardWeights};
pub use state::{QState, QueueBucket, StateKey, TimeBucket};
pub use trainer::{LearningTask, SharedAgent};
pub use transition::simulate;
