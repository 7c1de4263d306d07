// Centralizes the magic numbers of the toast overlay and notification center

use std::time::Duration;

// ============================================================================
// Animation Constants
// ============================================================================

/// How long a toast takes to slide in when animations are enabled
pub(crate) const ENTER_TRANSITION: Duration = Duration::from_millis(150);

/// How long a toast stays in the exiting state before it leaves the queue
pub(crate) const EXIT_TRANSITION: Duration = Duration::from_millis(300);

// ============================================================================
// Text Display Constants
// ============================================================================

/// Maximum length of a message preview in the notification center
pub(crate) const MESSAGE_PREVIEW_MAX_LENGTH: usize = 80;

/// Maximum length of a toast title before truncation
pub(crate) const TITLE_MAX_LENGTH: usize = 48;

// ============================================================================
// Queue and Event Constants
// ============================================================================

/// Initial capacity for the notification queue
pub(crate) const INITIAL_QUEUE_CAPACITY: usize = 16;

/// Buffer size for the lifecycle event broadcast channel
pub(crate) const EVENT_BUFFER_SIZE: usize = 64;
