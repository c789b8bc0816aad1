/// Header carrying the coarse-grained client API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Default avatar assigned to talents whose gender is "male"
pub const MALE_PROFILE_URL: &str = "https://static.vecteezy.com/system/resources/previews/002/002/403/non_2x/man-with-beard-avatar-character-isolated-icon-free-vector.jpg";

/// Default avatar assigned to every other talent
pub const FEMALE_PROFILE_URL: &str = "https://static.vecteezy.com/system/resources/previews/006/898/692/non_2x/avatar-face-icon-female-social-profile-of-business-woman-woman-portrait-support-service-call-center-illustration-free-vector.jpg";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_UNAUTHORIZED: &str = "Unauthorized";

pub const ERR_METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub const ERR_INTERNAL: &str = "Internal server error";

pub const ERR_PASSWORD_REQUIRED: &str = "Password is required";

pub const ERR_EMAIL_REQUIRED: &str = "Email is required";

pub const ERR_MISSING_CREDENTIALS: &str = "Missing email or password";

/// Shared by unknown-email and wrong-password so callers cannot enumerate accounts
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid email or password";

pub const ERR_USER_ID_REQUIRED: &str = "User ID is required";

pub const ERR_TALENT_ID_REQUIRED: &str = "Talent ID is required";

pub const ERR_PROFILE_URL_REQUIRED: &str = "Profile URL is required";

pub const ERR_URLS_REQUIRED: &str = "URLs are required";

pub const ERR_INVALID_BODY: &str = "Request body must be valid JSON";
