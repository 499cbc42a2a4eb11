use barter_types::{ActorId, BarterError, NewIntent, ResourceType, Result};
use serde::{Deserialize, Serialize};

/// Field length limits applied at creation, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentLimits {
    pub max_actor_len: usize,
    pub max_resource_len: usize,
}

impl Default for IntentLimits {
    fn default() -> Self {
        IntentLimits {
            max_actor_len: 64,
            max_resource_len: 128,
        }
    }
}

/// Normalise a creation request and check it for basic consistency.
///
/// Surrounding whitespace is trimmed from every field before the checks
/// run, so `"  "` counts as empty.
pub fn validate_new_intent(request: NewIntent, limits: &IntentLimits) -> Result<NewIntent> {
    let actor = request.actor.as_str().trim();
    let offer = request.offer.as_str().trim();
    let want = request.want.as_str().trim();

    check_field("actor", actor, limits.max_actor_len)?;
    check_field("offer", offer, limits.max_resource_len)?;
    check_field("want", want, limits.max_resource_len)?;

    if offer == want {
        return Err(BarterError::InvalidArgument(format!(
            "offer and want must be different (both are {:?})",
            offer
        )));
    }

    Ok(NewIntent {
        actor: ActorId::new(actor),
        offer: ResourceType::new(offer),
        want: ResourceType::new(want),
        deadline: request.deadline,
    })
}

fn check_field(name: &str, value: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(BarterError::InvalidArgument(format!("{} cannot be empty", name)));
    }

    let len = value.chars().count();
    if len > max_len {
        return Err(BarterError::InvalidArgument(format!(
            "{} is {} characters, limit is {}",
            name, len, max_len
        )));
    }

    Ok(())
}
