use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
}

pub const INDEX: Route = Route { name: "polls:index", path: "/polls/" };
pub const DETAIL: Route = Route { name: "polls:detail", path: "/polls/{question_id}/" };
pub const RESULTS: Route = Route { name: "polls:results", path: "/polls/{question_id}/results/" };
pub const VOTE: Route = Route { name: "polls:vote", path: "/polls/{question_id}/vote/" };
pub const ADMIN_QUESTIONS: Route = Route { name: "admin:questions", path: "/admin/questions" };
pub const ADMIN_QUESTION: Route = Route { name: "admin:question", path: "/admin/questions/{question_id}" };
pub const ADMIN_CHOICES: Route = Route { name: "admin:choices", path: "/admin/questions/{question_id}/choices" };

pub const ROUTES: [Route; 7] = [INDEX, DETAIL, RESULTS, VOTE, ADMIN_QUESTIONS, ADMIN_QUESTION, ADMIN_CHOICES];

pub fn lookup(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

impl Route {
    /// Fills every `{placeholder}` of the path from `params`.
    pub fn resolve(&self, params: &[(&str, String)]) -> Result<String, Error> {
        let mut url = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|i| start + i)
                .ok_or_else(|| Error::NoReverseMatch(self.name.to_owned()))?;
            let key = &rest[start + 1..end];
            let (_, value) = params
                .iter()
                .find(|(k, _)| *k == key)
                .ok_or_else(|| Error::NoReverseMatch(format!("{} (missing {})", self.name, key)))?;
            url.push_str(&rest[..start]);
            url.push_str(value);
            rest = &rest[end + 1..];
        }
        url.push_str(rest);
        Ok(url)
    }
}

pub fn reverse(name: &str, params: &[(&str, String)]) -> Result<String, Error> {
    lookup(name).ok_or_else(|| Error::NoReverseMatch(name.to_owned()))?.resolve(params)
}
