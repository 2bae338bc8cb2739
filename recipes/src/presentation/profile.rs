//! Profile screen state machine and its pure renderer.
//!
//! The screen is either a login form, a registration form, or the signed-in
//! profile. Transitions are explicit methods; [`render`] turns the current
//! state into what the screen shows without touching any service.

use zeroize::Zeroizing;

use crate::domain::ports::{DocumentStore, IdentityProvider};
use crate::domain::{AuthenticationService, Region, RegionCatalogueService, Session};

/// Which face of the profile screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    /// Email and password form for existing accounts.
    ViewingLogin,
    /// Email, password, and confirmation form for new accounts.
    ViewingRegister,
    /// Greeting and account actions for the signed-in user.
    ViewingProfile(Session),
}

/// Text typed into the login or registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: Zeroizing<String>,
    /// Confirmation field; only shown while registering.
    pub confirmation: Zeroizing<String>,
}

impl ProfileForm {
    fn clear(&mut self) {
        self.email.clear();
        self.password = Zeroizing::new(String::new());
        self.confirmation = Zeroizing::new(String::new());
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action completed.
    Success,
    /// The action failed; the message says why.
    Error,
}

/// Alert shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Message body.
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Alert title.
    pub const fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }
}

/// Profile screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileScreen {
    view: ProfileView,
    form: ProfileForm,
    show_password: bool,
    show_confirmation: bool,
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileScreen {
    /// A signed-out screen on the login form.
    pub fn new() -> Self {
        Self {
            view: ProfileView::ViewingLogin,
            form: ProfileForm::default(),
            show_password: false,
            show_confirmation: false,
        }
    }

    /// A screen matching the provider's current session.
    pub fn from_session(session: Option<Session>) -> Self {
        let mut screen = Self::new();
        screen.sync_session(session);
        screen
    }

    /// Current view.
    pub fn view(&self) -> &ProfileView {
        &self.view
    }

    /// Current form contents.
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Replace the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    /// Replace the password field.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = Zeroizing::new(password.into());
    }

    /// Replace the confirmation field.
    pub fn set_confirmation(&mut self, confirmation: impl Into<String>) {
        self.form.confirmation = Zeroizing::new(confirmation.into());
    }

    /// Switch between login and registration, clearing every field.
    ///
    /// Has no effect on the signed-in profile.
    pub fn toggle_mode(&mut self) {
        self.view = match self.view {
            ProfileView::ViewingLogin => ProfileView::ViewingRegister,
            ProfileView::ViewingRegister => ProfileView::ViewingLogin,
            ProfileView::ViewingProfile(_) => return,
        };
        self.form.clear();
    }

    /// Show or mask the password field.
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Show or mask the confirmation field.
    pub fn toggle_confirm_visibility(&mut self) {
        self.show_confirmation = !self.show_confirmation;
    }

    /// Move to the profile view for `session`.
    pub fn signed_in(&mut self, session: Session) {
        self.form.clear();
        self.view = ProfileView::ViewingProfile(session);
    }

    /// Return to the login form.
    pub fn signed_out(&mut self) {
        self.form.clear();
        self.show_password = false;
        self.show_confirmation = false;
        self.view = ProfileView::ViewingLogin;
    }

    /// Follow a session change published by the identity provider.
    pub fn sync_session(&mut self, session: Option<Session>) {
        match (session, &self.view) {
            (Some(session), _) => self.signed_in(session),
            (None, ProfileView::ViewingProfile(_)) => self.signed_out(),
            (None, _) => {}
        }
    }

    /// Sign in or register, depending on the current form.
    ///
    /// Validation and provider failures are reported as error notices and
    /// leave the form untouched.
    pub async fn submit<P>(&mut self, auth: &AuthenticationService<P>) -> Notice
    where
        P: IdentityProvider,
    {
        let result = match self.view {
            ProfileView::ViewingLogin => auth
                .login(&self.form.email, &self.form.password)
                .await
                .map(|session| (session, "Signed in successfully")),
            ProfileView::ViewingRegister => auth
                .register(
                    &self.form.email,
                    &self.form.password,
                    &self.form.confirmation,
                )
                .await
                .map(|session| (session, "Account created successfully")),
            ProfileView::ViewingProfile(_) => return Notice::error("Already signed in"),
        };

        match result {
            Ok((session, message)) => {
                self.signed_in(session);
                Notice::success(message)
            }
            Err(error) => Notice::error(error.message()),
        }
    }

    /// Sign out and return to the login form.
    pub async fn logout<P>(&mut self, auth: &AuthenticationService<P>) -> Notice
    where
        P: IdentityProvider,
    {
        match auth.logout().await {
            Ok(()) => {
                self.signed_out();
                Notice::success("Signed out")
            }
            Err(error) => Notice::error(error.message()),
        }
    }

    /// Import `regions` into the store from the profile view.
    pub async fn import_data<S>(
        &self,
        catalogue: &RegionCatalogueService<S>,
        regions: &[Region],
    ) -> Notice
    where
        S: DocumentStore,
    {
        if !matches!(self.view, ProfileView::ViewingProfile(_)) {
            return Notice::error("Sign in to import data");
        }
        if catalogue.import_seed_data_reported(regions).await {
            Notice::success("Data imported")
        } else {
            Notice::error("Could not import data")
        }
    }
}

/// Input fields the form can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Email input.
    Email,
    /// Password input.
    Password,
    /// Password confirmation input.
    Confirmation,
}

impl FormField {
    /// Placeholder text.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Confirmation => "Confirm password",
        }
    }
}

/// A visible input with its masking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRender {
    /// Which input.
    pub field: FormField,
    /// Whether typed characters are hidden.
    pub masked: bool,
}

/// Buttons the profile screen can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileButton {
    /// Submit the login form.
    SignIn,
    /// Submit the registration form.
    Register,
    /// Switch between login and registration.
    SwitchMode,
    /// Run the seed import.
    ImportData,
    /// Sign out.
    LogOut,
}

impl ProfileButton {
    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Register",
            Self::SwitchMode => "Switch",
            Self::ImportData => "Import Data",
            Self::LogOut => "Log out",
        }
    }
}

/// What the profile screen shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRender {
    /// Screen heading.
    pub title: &'static str,
    /// Greeting line, profile view only.
    pub greeting: Option<&'static str>,
    /// Signed-in email, profile view only.
    pub email: Option<String>,
    /// Visible inputs in display order.
    pub fields: Vec<FieldRender>,
    /// Visible buttons in display order.
    pub buttons: Vec<ProfileButton>,
    /// Prompt next to the mode switch, form views only.
    pub switch_prompt: Option<&'static str>,
}

/// Render `screen` without side effects.
///
/// # Examples
/// ```
/// use recipes::presentation::{FormField, ProfileScreen, render};
///
/// let mut screen = ProfileScreen::new();
/// assert_eq!(render(&screen).fields.len(), 2);
///
/// screen.toggle_mode();
/// let view = render(&screen);
/// assert_eq!(view.title, "Register");
/// assert_eq!(view.fields[2].field, FormField::Confirmation);
/// ```
pub fn render(screen: &ProfileScreen) -> ProfileRender {
    let email = FieldRender {
        field: FormField::Email,
        masked: false,
    };
    let password = FieldRender {
        field: FormField::Password,
        masked: !screen.show_password,
    };

    match &screen.view {
        ProfileView::ViewingLogin => ProfileRender {
            title: "Sign in",
            greeting: None,
            email: None,
            fields: vec![email, password],
            buttons: vec![ProfileButton::SignIn, ProfileButton::SwitchMode],
            switch_prompt: Some("No account yet? Register"),
        },
        ProfileView::ViewingRegister => ProfileRender {
            title: "Register",
            greeting: None,
            email: None,
            fields: vec![
                email,
                password,
                FieldRender {
                    field: FormField::Confirmation,
                    masked: !screen.show_confirmation,
                },
            ],
            buttons: vec![ProfileButton::Register, ProfileButton::SwitchMode],
            switch_prompt: Some("Already have an account? Sign in"),
        },
        ProfileView::ViewingProfile(session) => ProfileRender {
            title: "Profile",
            greeting: Some("Hello,"),
            email: Some(session.email().to_owned()),
            fields: Vec::new(),
            buttons: vec![ProfileButton::ImportData, ProfileButton::LogOut],
            switch_prompt: None,
        },
    }
}
