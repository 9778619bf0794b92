//! Visitor-facing text in the four offered languages.
//!
//! Survey options are shown and stored in English; everything around them
//! follows the visitor's choice.

use common::model::feedback::Question;
use common::model::language::Language;

pub struct Texts {
    pub language_name: &'static str,

    pub rate_title: &'static str,
    pub comments: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub thanks: &'static str,
    pub already_rated: &'static str,
    pub select_stars: &'static str,
    pub success: &'static str,
    pub loading: &'static str,
    pub model_not_found: &'static str,
    pub view_dashboard: &'static str,

    pub feedback_title: &'static str,
    pub personal_info: &'static str,
    pub step: &'static str,
    pub of: &'static str,
    pub next: &'static str,
    pub previous: &'static str,
    pub submit_feedback: &'static str,
    pub your_name: &'static str,
    pub place_from: &'static str,
    pub mobile: &'static str,
    pub email: &'static str,
    pub profession: &'static str,
    pub accompanying: &'static str,
    pub final_thoughts: &'static str,
    pub thank_you: &'static str,
    pub back_home: &'static str,
    questions: [&'static str; 5],
}

impl Texts {
    pub fn question(&self, question: Question) -> &'static str {
        let index = Question::ALL.iter().position(|q| *q == question).unwrap_or(0);
        self.questions[index]
    }
}

pub fn texts(language: Language) -> &'static Texts {
    match language {
        Language::English => &EN,
        Language::Urdu => &UR,
        Language::Kannada => &KN,
        Language::RomanUrdu => &RU,
    }
}

static EN: Texts = Texts {
    language_name: "English",
    rate_title: "Rate This Model",
    comments: "Comments (Optional)",
    submit: "Submit Rating",
    submitting: "Submitting...",
    thanks: "Thank you for rating!",
    already_rated: "You have already rated this model",
    select_stars: "Please select a star rating",
    success: "Your rating has been submitted successfully!",
    loading: "Loading...",
    model_not_found: "Model Not Found",
    view_dashboard: "View Dashboard",
    feedback_title: "Exhibition Feedback",
    personal_info: "Personal Information",
    step: "Step",
    of: "of",
    next: "Next",
    previous: "Previous",
    submit_feedback: "Submit Feedback",
    your_name: "Your Name *",
    place_from: "Place you're from *",
    mobile: "Mobile Number",
    email: "Email Address",
    profession: "What is your profession? *",
    accompanying: "How many people accompanied you? *",
    final_thoughts: "Final Thoughts",
    thank_you: "Thank you for your valuable feedback!",
    back_home: "Back to Home",
    questions: [
        "Describe your overall experience",
        "How well was the exhibition organized and presented?",
        "How easy was it to move around and view all the models?",
        "What new things did you learn from this exhibition?",
        "What do you think could be improved for future exhibitions?",
    ],
};

static UR: Texts = Texts {
    language_name: "اردو",
    rate_title: "اس ماڈل کی درجہ بندی کریں",
    comments: "تبصرے (اختیاری)",
    submit: "جمع کریں",
    submitting: "جمع ہو رہا ہے...",
    thanks: "شکریہ",
    already_rated: "آپ پہلے ہی درجہ بندی کر چکے ہیں",
    select_stars: "براہ کرم درجہ بندی کریں",
    success: "آپ کی درجہ بندی کامیابی سے جمع ہوگئی!",
    loading: "لوڈ ہو رہا ہے...",
    model_not_found: "ماڈل نہیں ملا",
    view_dashboard: "ڈیش بورڈ دیکھیں",
    feedback_title: "نمائش کی رائے",
    personal_info: "ذاتی معلومات",
    step: "مرحلہ",
    of: "میں سے",
    next: "اگلا",
    previous: "پچھلا",
    submit_feedback: "رائے جمع کریں",
    your_name: "آپ کا نام *",
    place_from: "آپ کہاں سے آئے ہیں؟ *",
    mobile: "موبائل نمبر",
    email: "ای میل پتہ",
    profession: "آپ کا پیشہ کیا ہے؟ *",
    accompanying: "آپ کے ساتھ کتنے لوگ آئے؟ *",
    final_thoughts: "آخری خیالات",
    thank_you: "آپ کے قیمتی تاثرات کا شکریہ!",
    back_home: "واپس جائیں",
    questions: [
        "اپنے مجموعی تجربے کی وضاحت کریں",
        "نمائش کس حد تک منظم اور پیش کی گئی تھی؟",
        "تمام ماڈلز دیکھنے میں کتنی آسانی تھی؟",
        "آپ نے اس نمائش سے کیا نیا سیکھا؟",
        "آئندہ نمائش کے لیے آپ کے کیا مشورے ہیں؟",
    ],
};

static KN: Texts = Texts {
    language_name: "ಕನ್ನಡ",
    rate_title: "ಈ ಮಾದರಿಗೆ ರೇಟ್ ಮಾಡಿ",
    comments: "ಕಾಮೆಂಟ್‌ಗಳು (ಐಚ್ಛಿಕ)",
    submit: "ಸಲ್ಲಿಸಿ",
    submitting: "ಸಲ್ಲಿಸಲಾಗುತ್ತಿದೆ...",
    thanks: "ಧನ್ಯವಾದ",
    already_rated: "ನೀವು ಈಗಾಗಲೇ ರೇಟ್ ಮಾಡಿದ್ದೀರಿ",
    select_stars: "ದಯವಿಟ್ಟು ರೇಟ್ ಮಾಡಿ",
    success: "ನಿಮ್ಮ ರೇಟಿಂಗ್ ಯಶಸ್ವಿಯಾಗಿ ಸಲ್ಲಿಸಲಾಗಿದೆ!",
    loading: "ಲೋಡ್ ಆಗುತ್ತಿದೆ...",
    model_not_found: "ಮಾದರಿ ಕಂಡುಬಂದಿಲ್ಲ",
    view_dashboard: "ಡ್ಯಾಶ್‌ಬೋರ್ಡ್ ನೋಡಿ",
    feedback_title: "ಪ್ರದರ್ಶನ ಪ್ರತಿಕ್ರಿಯೆ",
    personal_info: "ವೈಯಕ್ತಿಕ ಮಾಹಿತಿ",
    step: "ಹಂತ",
    of: "/",
    next: "ಮುಂದೆ",
    previous: "ಹಿಂದೆ",
    submit_feedback: "ಪ್ರತಿಕ್ರಿಯೆ ಸಲ್ಲಿಸಿ",
    your_name: "ನಿಮ್ಮ ಹೆಸರು *",
    place_from: "ನೀವು ಯಾವ ಸ್ಥಳದಿಂದ ಬಂದಿದ್ದೀರಿ? *",
    mobile: "ಮೊಬೈಲ್ ಸಂಖ್ಯೆ",
    email: "ಇಮೇಲ್ ವಿಳಾಸ",
    profession: "ನಿಮ್ಮ ವೃತ್ತಿ ಏನು? *",
    accompanying: "ನಿಮ್ಮ ಜೊತೆ ಎಷ್ಟು ಜನರು ಬಂದಿದ್ದರು? *",
    final_thoughts: "ಕೊನೆಯ ಆಲೋಚನೆಗಳು",
    thank_you: "ನಿಮ್ಮ ಅಮೂಲ್ಯ ಪ್ರತಿಕ್ರಿಯೆಗೆ ಧನ್ಯವಾದಗಳು!",
    back_home: "ಮುಖಪುಟಕ್ಕೆ ಹಿಂತಿರುಗಿ",
    questions: [
        "ನಿಮ್ಮ ಒಟ್ಟು ಅನುಭವವನ್ನು ವಿವರಿಸಿ",
        "ಪ್ರದರ್ಶನವನ್ನು ಎಷ್ಟು ಚೆನ್ನಾಗಿ ಆಯೋಜಿಸಲಾಯಿತು?",
        "ಎಲ್ಲಾ ಮಾದರಿಗಳನ್ನು ನೋಡಲು ಎಷ್ಟು ಸುಲಭವಿತ್ತು?",
        "ಈ ಪ್ರದರ್ಶನದಿಂದ ನೀವು ಏನು ಹೊಸದಾಗಿ ಕಲಿತಿರಿ?",
        "ಭವಿಷ್ಯದ ಪ್ರದರ್ಶನಕ್ಕೆ ಯಾವ ಸುಧಾರಣೆಗಳನ್ನು ನೀವು ಸಲಹೆ ನೀಡುತ್ತೀರಿ?",
    ],
};

static RU: Texts = Texts {
    language_name: "Urdu (Roman)",
    rate_title: "Is Model ko Rate Karein",
    comments: "Tabsare (Ikhtiyari)",
    submit: "Jama Karein",
    submitting: "Jama ho raha hai...",
    thanks: "Shukriya!",
    already_rated: "Aap is model ko pehle hi rate kar chuke hain",
    select_stars: "Baraye meharbani rating chunein",
    success: "Aap ki rating kamyabi se jama ho gayi!",
    loading: "Load ho raha hai...",
    model_not_found: "Model nahi mila",
    view_dashboard: "Dashboard Dekhein",
    feedback_title: "Namayish ki Feedback",
    personal_info: "Zaati Maloomat",
    step: "Marhala",
    of: "mein se",
    next: "Agla",
    previous: "Pichla",
    submit_feedback: "Feedback Jama Karein",
    your_name: "Aap ka Naam *",
    place_from: "Aap kahan se aaye hain? *",
    mobile: "Mobile Number",
    email: "Email Address",
    profession: "Aap kya kaam karthe hai? *",
    accompanying: "Aap ke sath kitne log aaye? *",
    final_thoughts: "Aakhri Khayalat",
    thank_you: "Aap ke qeemati feedback ka shukriya!",
    back_home: "Wapas Jayein",
    questions: [
        "Apka overall experience kaisa raha?",
        "Models kitne achi tarah pesh kiye gaye the?",
        "Tamam models dekhne mein kitni asaani thi?",
        "Aap exhibition mein se kya naya seekha?",
        "Aap kya feedback hai?",
    ],
};
