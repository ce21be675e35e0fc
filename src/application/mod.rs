//! Application layer - phase handlers and the session that drives them.
//!
//! Handlers coordinate the domain rules with the language model gateway.
//! The gateway is the only port they touch.

pub mod gateway;
pub mod handlers;
pub mod model_output;
pub mod session;

pub use gateway::{CompletionOptions, LanguageModelGateway, ModelError};
pub use handlers::{
    DiscoverFactorsCommand, DiscoverFactorsHandler, EnrichPreferencesCommand,
    EnrichPreferencesHandler, GenerateScenariosCommand, GenerateScenariosHandler,
    ReactionAggregator, RecordReactionCommand, SynthesizeInsightsCommand,
    SynthesizeInsightsHandler,
};
pub use session::ReflectionSession;
