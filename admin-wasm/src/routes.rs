use admin_client::{GuardDecision, Session, evaluate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Login,
    Register,
    Dashboard,
    Users,
    Companies,
    CompanyJobs(String),
}

/// Пункты бокового меню.
pub(crate) const NAV_ITEMS: [Route; 3] = [Route::Dashboard, Route::Users, Route::Companies];

impl Route {
    /// Стартовая страница: дашборд для администратора, иначе вход.
    pub(crate) fn initial(session: Option<&Session>) -> Self {
        match evaluate(session) {
            GuardDecision::Allow(_) => Self::Dashboard,
            GuardDecision::Redirect { .. } => Self::Login,
        }
    }

    pub(crate) fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Login => "Admin Login",
            Self::Register => "Admin Registration",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Companies => "Companies",
            Self::CompanyJobs(_) => "Company Jobs",
        }
    }

    /// Подсвечивать ли пункт меню `item`; вакансии компании относятся к Companies.
    pub(crate) fn highlights(&self, item: &Route) -> bool {
        match (self, item) {
            (Self::CompanyJobs(_), Self::Companies) => true,
            (current, item) => current == item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admin_client::Role;

    #[test]
    fn initial_route_depends_on_role() {
        assert_eq!(Route::initial(None), Route::Login);

        let seeker = Session::new("tok", Role::Other("USER".to_string()));
        assert_eq!(Route::initial(Some(&seeker)), Route::Login);

        let admin = Session::new("tok", Role::Admin);
        assert_eq!(Route::initial(Some(&admin)), Route::Dashboard);
    }

    #[test]
    fn auth_pages_are_public() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::CompanyJobs("c1".to_string()).is_protected());
    }

    #[test]
    fn company_jobs_highlight_companies() {
        let current = Route::CompanyJobs("c1".to_string());
        assert!(current.highlights(&Route::Companies));
        assert!(!current.highlights(&Route::Users));
        assert!(Route::Users.highlights(&Route::Users));
    }
}
