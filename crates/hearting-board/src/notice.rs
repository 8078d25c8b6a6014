use std::fmt;

/// Every message the board shows in a blocking dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    ReportAcceptedConfirmDelete,
    AlreadyReported,
    ReportUnauthorized,
    ReportFailed,
    MessageDeleted,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ReportAcceptedConfirmDelete => {
                "Your report has been received. Do you want to delete this message?"
            }
            Self::AlreadyReported => "This message has already been reported.",
            Self::ReportUnauthorized => "You are not allowed to report this message.",
            Self::ReportFailed => "Reporting failed. Please try again later.",
            Self::MessageDeleted => "The message has been deleted.",
        };
        f.write_str(text)
    }
}

/// Blocking alert/confirm dialogs, supplied by whatever front end drives the board.
pub trait Prompter: Send + Sync {
    fn alert(&self, notice: Notice);

    fn confirm(&self, notice: Notice) -> bool;
}
