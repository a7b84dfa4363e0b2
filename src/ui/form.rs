//! # Profile Form
//!
//! Editable state behind the input screen. The form always holds at least
//! one course row; blank-named rows are dropped when the profile is built.
//!
//! Focus moves over a flat list of [`FormField`]s: the three profile fields
//! followed by four fields per course row.

use crate::planner::types::{Course, Deadline, StudentProfile};
use thiserror::Error;

pub const DEFAULT_STRESS_LEVEL: u8 = 5;
pub const DEFAULT_FREE_TIME: f32 = 4.0;
pub const DEFAULT_DIFFICULTY: u8 = 3;
pub const DEFAULT_ESTIMATED_HOURS: f32 = 2.0;

pub const STRESS_RANGE: (u8, u8) = (1, 10);
pub const DIFFICULTY_RANGE: (u8, u8) = (1, 5);
pub const FREE_TIME_RANGE: (f32, f32) = (0.0, 24.0);
pub const HOURS_RANGE: (f32, f32) = (1.0, 100.0);
const HALF_HOUR: f32 = 0.5;

/// Label for a difficulty level, 1-5.
pub fn difficulty_label(difficulty: u8) -> &'static str {
    match difficulty {
        1 => "Very easy",
        2 => "Easy",
        3 => "Medium",
        4 => "Hard",
        _ => "Very hard",
    }
}

/// Why a profile could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter your name")]
    MissingName,

    #[error("Course '{course}' needs a deadline")]
    MissingDeadline { course: String },

    #[error("Course '{course}': '{value}' is not a date (use YYYY-MM-DD or YYYY-MM-DDTHH:MM)")]
    InvalidDeadline { course: String, value: String },
}

/// Fields of one course row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Difficulty,
    Hours,
    Deadline,
}

impl CourseField {
    const ORDER: [CourseField; 4] = [
        CourseField::Name,
        CourseField::Difficulty,
        CourseField::Hours,
        CourseField::Deadline,
    ];
}

/// A focusable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    StressLevel,
    FreeTime,
    Course { row: usize, field: CourseField },
}

impl FormField {
    /// Text fields take typed characters; the others are adjusted with ←/→.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::Course {
                    field: CourseField::Name | CourseField::Deadline,
                    ..
                }
        )
    }
}

/// One editable course row.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub id: u32,
    pub name: String,
    pub difficulty: u8,
    pub estimated_hours: f32,
    /// Raw text, parsed on submit.
    pub deadline: String,
}

impl CourseDraft {
    fn blank(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            difficulty: DEFAULT_DIFFICULTY,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            deadline: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub stress_level: u8,
    pub free_time: f32,
    pub courses: Vec<CourseDraft>,
    pub focus: usize,
    next_id: u32,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            stress_level: DEFAULT_STRESS_LEVEL,
            free_time: DEFAULT_FREE_TIME,
            courses: vec![CourseDraft::blank(1)],
            focus: 0,
            next_id: 2,
        }
    }

    /// The sample profile used by `--demo`.
    pub fn demo() -> Self {
        let mut form = Self::new();
        form.name = "Student A".to_string();
        form.courses = vec![
            CourseDraft {
                id: 1,
                name: "Advanced Mathematics".to_string(),
                difficulty: 5,
                estimated_hours: 10.0,
                deadline: "2024-06-20".to_string(),
            },
            CourseDraft {
                id: 2,
                name: "Modern History".to_string(),
                difficulty: 3,
                estimated_hours: 5.0,
                deadline: "2024-06-18".to_string(),
            },
        ];
        form.next_id = 3;
        form
    }

    /// All focusable fields, in tab order.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Name, FormField::StressLevel, FormField::FreeTime];
        for row in 0..self.courses.len() {
            fields.extend(
                CourseField::ORDER
                    .iter()
                    .map(|&field| FormField::Course { row, field }),
            );
        }
        fields
    }

    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let count = self.fields().len();
        self.focus = (self.focus + count - 1) % count;
    }

    fn focus_field(&mut self, target: FormField) {
        if let Some(index) = self.fields().iter().position(|f| *f == target) {
            self.focus = index;
        }
    }

    /// Append a blank course row and focus its name.
    pub fn add_course(&mut self) {
        self.courses.push(CourseDraft::blank(self.next_id));
        self.next_id += 1;
        self.focus_field(FormField::Course {
            row: self.courses.len() - 1,
            field: CourseField::Name,
        });
    }

    /// Remove a course row. The last remaining row cannot be removed.
    pub fn remove_course(&mut self, row: usize) -> bool {
        if self.courses.len() <= 1 || row >= self.courses.len() {
            return false;
        }
        self.courses.remove(row);
        let last = self.fields().len() - 1;
        self.focus = self.focus.min(last);
        true
    }

    /// Remove the row that holds focus, if focus is on a course.
    pub fn remove_focused_course(&mut self) -> bool {
        match self.focused() {
            FormField::Course { row, .. } => self.remove_course(row),
            _ => false,
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.focused() {
            FormField::Name => self.name.push(c),
            FormField::Course {
                row,
                field: CourseField::Name,
            } => self.courses[row].name.push(c),
            FormField::Course {
                row,
                field: CourseField::Deadline,
            } => {
                if c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | ' ') {
                    self.courses[row].deadline.push(c);
                }
            }
            FormField::StressLevel
            | FormField::FreeTime
            | FormField::Course {
                field: CourseField::Difficulty | CourseField::Hours,
                ..
            } => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focused() {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Course {
                row,
                field: CourseField::Name,
            } => {
                self.courses[row].name.pop();
            }
            FormField::Course {
                row,
                field: CourseField::Deadline,
            } => {
                self.courses[row].deadline.pop();
            }
            FormField::StressLevel
            | FormField::FreeTime
            | FormField::Course {
                field: CourseField::Difficulty | CourseField::Hours,
                ..
            } => {}
        }
    }

    /// Step the focused numeric field up (`+1`) or down (`-1`).
    pub fn adjust(&mut self, direction: i8) {
        match self.focused() {
            FormField::StressLevel => {
                self.stress_level = step_u8(self.stress_level, direction, STRESS_RANGE);
            }
            FormField::FreeTime => {
                self.free_time = step_f32(self.free_time, direction, FREE_TIME_RANGE);
            }
            FormField::Course {
                row,
                field: CourseField::Difficulty,
            } => {
                let course = &mut self.courses[row];
                course.difficulty = step_u8(course.difficulty, direction, DIFFICULTY_RANGE);
            }
            FormField::Course {
                row,
                field: CourseField::Hours,
            } => {
                let course = &mut self.courses[row];
                course.estimated_hours = step_f32(course.estimated_hours, direction, HOURS_RANGE);
            }
            FormField::Name
            | FormField::Course {
                field: CourseField::Name | CourseField::Deadline,
                ..
            } => {}
        }
    }

    /// Validate and build the profile. Blank-named courses are dropped before
    /// validation; a profile with no courses left is still accepted.
    pub fn to_profile(&self, current_date: Option<String>) -> Result<StudentProfile, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let mut courses = Vec::new();
        for draft in self.courses.iter().filter(|c| !c.name.trim().is_empty()) {
            let course_name = draft.name.trim().to_string();
            if draft.deadline.trim().is_empty() {
                return Err(FormError::MissingDeadline {
                    course: course_name,
                });
            }
            let deadline: Deadline =
                draft
                    .deadline
                    .parse()
                    .map_err(|_| FormError::InvalidDeadline {
                        course: course_name.clone(),
                        value: draft.deadline.trim().to_string(),
                    })?;
            courses.push(Course {
                id: draft.id,
                name: course_name,
                difficulty: draft.difficulty,
                deadline,
                estimated_hours: draft.estimated_hours,
            });
        }

        Ok(StudentProfile {
            name: name.to_string(),
            stress_level: self.stress_level,
            free_time_per_day: self.free_time,
            courses,
            current_date,
        })
    }
}

fn step_u8(value: u8, direction: i8, (min, max): (u8, u8)) -> u8 {
    if direction > 0 {
        value.saturating_add(1).min(max)
    } else {
        value.saturating_sub(1).max(min)
    }
}

fn step_f32(value: f32, direction: i8, (min, max): (f32, f32)) -> f32 {
    let stepped = if direction > 0 {
        value + HALF_HOUR
    } else {
        value - HALF_HOUR
    };
    stepped.clamp(min, max)
}
