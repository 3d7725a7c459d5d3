use serde::{Deserialize, Serialize};

/// One of the five questions on the form.
///
/// The order of [`Field::ALL`] is the order the form is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Like,
    Skill,
    Hobby,
    Dream,
    Hate,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Like, Field::Skill, Field::Hobby, Field::Dream, Field::Hate];

    /// Wire name of the field in the request body.
    pub fn key(self) -> &'static str {
        match self {
            Field::Like => "like",
            Field::Skill => "skill",
            Field::Hobby => "hobby",
            Field::Dream => "dream",
            Field::Hate => "hate",
        }
    }

    fn index(self) -> usize {
        match self {
            Field::Like => 0,
            Field::Skill => 1,
            Field::Hobby => 2,
            Field::Dream => 3,
            Field::Hate => 4,
        }
    }

    /// Next field in form order, wrapping around to the first.
    pub fn next(self) -> Field {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field in form order, wrapping around to the last.
    pub fn previous(self) -> Field {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_last(self) -> bool {
        self == Field::Hate
    }

    /// The aversion question is rendered as a warning.
    pub fn is_risk(self) -> bool {
        self == Field::Hate
    }
}

/// The user's five free-text answers.
///
/// Serializes to a JSON object with exactly the keys `like`, `skill`,
/// `hobby`, `dream` and `hate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub like: String,
    pub skill: String,
    pub hobby: String,
    pub dream: String,
    pub hate: String,
}

impl Answers {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Like => &self.like,
            Field::Skill => &self.skill,
            Field::Hobby => &self.hobby,
            Field::Dream => &self.dream,
            Field::Hate => &self.hate,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Like => &mut self.like,
            Field::Skill => &mut self.skill,
            Field::Hobby => &mut self.hobby,
            Field::Dream => &mut self.dream,
            Field::Hate => &mut self.hate,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// A matched course backing a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseMatch {
    pub name: String,
    #[serde(rename = "match")]
    pub match_score: f64,
}

/// Ranked output of the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub winner: String,
    pub score: f64,
    pub courses: Vec<CourseMatch>,
    pub runner_up: String,
}

/// Lifecycle of the single screen.
///
/// `Result` owns its recommendation, so a recommendation exists exactly
/// when the view is showing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Input,
    Analyzing,
    Result(Recommendation),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Input => "input",
            ViewState::Analyzing => "analyzing",
            ViewState::Result(_) => "result",
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            ViewState::Result(recommendation) => Some(recommendation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answers_default_is_blank() {
        let answers = Answers::default();
        assert!(answers.is_blank());
        for field in Field::ALL {
            assert_eq!(answers.get(field), "");
        }
    }

    #[test]
    fn test_answers_set_and_get() {
        let mut answers = Answers::default();
        answers.set(Field::Skill, "คณิต");
        answers.set(Field::Hate, "เกลียดเลข");

        assert_eq!(answers.skill, "คณิต");
        assert_eq!(answers.get(Field::Hate), "เกลียดเลข");
        assert_eq!(answers.get(Field::Like), "");
        assert!(!answers.is_blank());
    }

    #[test]
    fn test_answers_serialize_to_five_keys() {
        let mut answers = Answers::default();
        answers.set(Field::Dream, "Developer");

        let value = serde_json::to_value(&answers).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        for field in Field::ALL {
            assert!(object.contains_key(field.key()), "missing key {}", field.key());
        }
        assert_eq!(object["dream"], "Developer");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::Like.next(), Field::Skill);
        assert_eq!(Field::Hate.next(), Field::Like);
        assert_eq!(Field::Like.previous(), Field::Hate);
        assert_eq!(Field::Dream.previous(), Field::Hobby);
        assert!(Field::Hate.is_last());
        assert!(!Field::Dream.is_last());
    }

    #[test]
    fn test_recommendation_deserializes_service_body() {
        let body = json!({
            "winner": "วิศวกรรมคอมพิวเตอร์",
            "score": 9.5,
            "runner_up": "วิทยาการคอมพิวเตอร์",
            "courses": [
                {"name": "คณิตศาสตร์", "match": 90},
                {"name": "การเขียนโปรแกรม", "match": 71}
            ]
        });

        let recommendation: Recommendation = serde_json::from_value(body).unwrap();

        assert_eq!(recommendation.winner, "วิศวกรรมคอมพิวเตอร์");
        assert_eq!(recommendation.score, 9.5);
        assert_eq!(recommendation.courses.len(), 2);
        assert_eq!(recommendation.courses[0].match_score, 90.0);
        assert_eq!(recommendation.runner_up, "วิทยาการคอมพิวเตอร์");
    }

    #[test]
    fn test_recommendation_missing_key_is_rejected() {
        let body = json!({"winner": "x", "score": 1, "courses": []});
        assert!(serde_json::from_value::<Recommendation>(body).is_err());
    }

    #[test]
    fn test_view_state_recommendation_only_in_result() {
        assert!(ViewState::Input.recommendation().is_none());
        assert!(ViewState::Analyzing.recommendation().is_none());

        let recommendation = Recommendation {
            winner: "A".to_string(),
            score: 1.0,
            courses: vec![],
            runner_up: "B".to_string(),
        };
        let state = ViewState::Result(recommendation.clone());
        assert_eq!(state.recommendation(), Some(&recommendation));
        assert_eq!(state.name(), "result");
    }
}
