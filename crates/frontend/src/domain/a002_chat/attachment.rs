//! Document attachment state for the active session.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    None,
    Uploading,
    Success,
    Fail,
}

/// A file the backend can read; the browser adapter uses `web_sys::File`.
pub trait NamedFile {
    fn file_name(&self) -> String;
}

impl NamedFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Handed to the view so it can schedule hiding the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTicket {
    pub generation: u64,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentState {
    pub status: UploadStatus,
    /// Name of the file in the latest upload, shown in the banner.
    pub file_name: Option<String>,
    /// A document is attached to the active session; sent with every `/ask`.
    pub has_file: bool,
    /// The attached document. Only a successful upload changes it.
    pub attached_name: Option<String>,
    pub banner_visible: bool,
    /// Bumped by every upload so stale banner timers are ignored.
    pub banner_generation: u64,
}

impl AttachmentState {
    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn begin(&mut self, file_name: String) -> u64 {
        self.status = UploadStatus::Uploading;
        self.file_name = Some(file_name);
        self.banner_visible = true;
        self.banner_generation += 1;
        self.banner_generation
    }

    pub fn succeed(&mut self) -> BannerTicket {
        self.status = UploadStatus::Success;
        self.has_file = true;
        self.attached_name = self.file_name.clone();
        self.ticket()
    }

    /// A failed upload leaves an earlier successful attachment in place.
    pub fn fail(&mut self) -> BannerTicket {
        self.status = UploadStatus::Fail;
        self.ticket()
    }

    /// Hide the banner unless a newer upload has started since `generation`.
    pub fn hide_banner(&mut self, generation: u64) -> bool {
        if generation != self.banner_generation {
            return false;
        }
        self.banner_visible = false;
        true
    }

    /// New chat / personality switch. The generation keeps counting so
    /// timers armed before the reset stay stale.
    pub fn reset(&mut self) {
        let generation = self.banner_generation;
        *self = Self {
            banner_generation: generation,
            ..Self::default()
        };
    }

    fn ticket(&self) -> BannerTicket {
        BannerTicket {
            generation: self.banner_generation,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flow() {
        let mut a = AttachmentState::default();
        let generation = a.begin("notes.pdf".into());
        assert!(a.is_uploading());
        assert!(a.banner_visible);

        let ticket = a.succeed();
        assert_eq!(ticket.generation, generation);
        assert_eq!(ticket.status, UploadStatus::Success);
        assert!(a.has_file);
        assert_eq!(a.file_name.as_deref(), Some("notes.pdf"));
        assert_eq!(a.attached_name.as_deref(), Some("notes.pdf"));

        assert!(a.hide_banner(generation));
        assert!(!a.banner_visible);
    }

    #[test]
    fn test_stale_banner_timer_is_ignored() {
        let mut a = AttachmentState::default();
        let first = a.begin("a.txt".into());
        a.fail();
        let second = a.begin("b.txt".into());
        assert!(!a.hide_banner(first));
        assert!(a.banner_visible);
        assert!(a.hide_banner(second));
    }

    #[test]
    fn test_failed_upload_keeps_attached_document() {
        let mut a = AttachmentState::default();
        a.begin("notes.pdf".into());
        a.succeed();
        a.begin("broken.docx".into());
        a.fail();
        assert!(a.has_file);
        assert_eq!(a.attached_name.as_deref(), Some("notes.pdf"));
        assert_eq!(a.file_name.as_deref(), Some("broken.docx"));
    }

    #[test]
    fn test_reset_clears_attachment_but_not_generation() {
        let mut a = AttachmentState::default();
        let generation = a.begin("a.txt".into());
        a.succeed();
        a.reset();
        assert_eq!(a.status, UploadStatus::None);
        assert!(!a.has_file);
        assert!(a.file_name.is_none());
        assert!(a.attached_name.is_none());
        assert_eq!(a.banner_generation, generation);
        assert!(!a.banner_visible);
    }
}
