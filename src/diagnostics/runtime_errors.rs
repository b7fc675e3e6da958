use super::error_code::ErrorCode;

pub const NULL_HANDLE: ErrorCode = ErrorCode {
    code: "E2000",
    title: "NULL HANDLE",
    message: "Expected {} object, got a null handle.",
    hint: Some("The handle was never set, or its reference was moved or escaped."),
};

pub const TYPE_ERROR: ErrorCode = ErrorCode {
    code: "E2001",
    title: "TYPE ERROR",
    message: "Expected {} object, got {}.", // expected type, repr of actual
    hint: None,
};

pub const INDEX_OUT_OF_RANGE: ErrorCode = ErrorCode {
    code: "E2002",
    title: "INDEX OUT OF RANGE",
    message: "Index {} out of range for list of length {}.",
    hint: Some("Valid indices are 0 through len - 1."),
};
