//! Locale tables and text-direction metadata.
//!
//! Strings are projected on demand from static per-locale dictionaries and
//! never stored. Category labels fall back from the dictionary to a generic
//! capitalize-each-word transform, because catalogs may carry categories the
//! dictionary does not cover.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// A selected display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
    He,
    Fr,
    Es,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl Locale {
    /// Parses a locale code (e.g. "fr"). Unknown codes resolve to `None`;
    /// callers fall back to the default locale.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            "he" => Some(Locale::He),
            "fr" => Some(Locale::Fr),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::He => "he",
            Locale::Fr => "fr",
            Locale::Es => "es",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ar => "العربية",
            Locale::He => "עברית",
            Locale::Fr => "Français",
            Locale::Es => "Español",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::Ar | Locale::He => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    /// The UI string dictionary for this locale.
    pub fn translations(&self) -> &'static Translations {
        match self {
            Locale::En => &EN,
            Locale::Ar => &AR,
            Locale::He => &HE,
            Locale::Fr => &FR,
            Locale::Es => &ES,
        }
    }

    /// Directive appended to the system instructions so replies come back in
    /// the active language. Empty for the default locale.
    pub fn response_directive(&self) -> &'static str {
        match self {
            Locale::En => "",
            Locale::Ar => " Always respond in Arabic.",
            Locale::He => " Always respond in Hebrew.",
            Locale::Fr => " Always respond in French.",
            Locale::Es => " Always respond in Spanish.",
        }
    }

    /// Localized label for a raw category key. Falls back to
    /// capitalize-each-word when the dictionary has no entry.
    pub fn category_label(&self, raw: &str) -> String {
        self.translations()
            .categories
            .iter()
            .find(|(key, _)| *key == raw)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| capitalize_words(raw))
    }
}

/// Capitalizes the first letter of each whitespace-separated word.
pub fn capitalize_words(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Substitutes a single named placeholder (e.g. `{product}`) in a template.
pub fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{key}}}"), value)
}

/// The complete UI string dictionary for one locale.
pub struct Translations {
    pub page_title: &'static str,
    pub product_selection: &'static str,
    pub selected_products_title: &'static str,
    pub chat_title: &'static str,

    pub category_select: &'static str,
    pub search_placeholder: &'static str,
    pub chat_placeholder: &'static str,

    pub generate_routine: &'static str,
    pub generating: &'static str,
    pub clear_all: &'static str,
    pub add_to_routine: &'static str,
    pub added_to_routine: &'static str,
    pub remove_from_routine: &'static str,

    /// Raw category key → localized label.
    pub categories: &'static [(&'static str, &'static str)],

    pub no_products_selected: &'static str,
    pub no_products_found: &'static str,
    pub select_category: &'static str,
    /// Template with `{product}`.
    pub added_product: &'static str,
    /// Template with `{product}`.
    pub removed_product: &'static str,
    pub cleared_all: &'static str,
    pub select_at_least_one: &'static str,
    pub error_generating: &'static str,
    pub error_chat: &'static str,

    pub live_search_enabled: &'static str,
    pub live_search_disabled: &'static str,
    /// Template with `{query}`.
    pub searching_live: &'static str,
    pub search_complete: &'static str,

    pub welcome: &'static str,

    /// Opening line of the routine-generation prompt.
    pub routine_intro: &'static str,
    /// Localized "Additional Tips" heading used in the routine prompt.
    pub routine_tips: &'static str,
}

static EN: Translations = Translations {
    page_title: "Ritu Routine Builder",
    product_selection: "Product Selection",
    selected_products_title: "Selected Products",
    chat_title: "Let's Build Your Routine",

    category_select: "Choose a Category",
    search_placeholder: "Search products by name or keyword...",
    chat_placeholder: "Ask me about products or routines…",

    generate_routine: "✨ Generate My Routine",
    generating: "✨ Generating...",
    clear_all: "Clear All",
    add_to_routine: "Add to My Routine",
    added_to_routine: "Added to Routine",
    remove_from_routine: "Remove from routine",

    categories: &[
        ("cleanser", "Face Cleanser"),
        ("moisturizer", "Moisturizer"),
        ("skincare", "Skincare & Serums"),
        ("suncare", "Suncare"),
        ("makeup", "Makeup"),
        ("haircare", "Hair Care"),
        ("hair color", "Hair Color"),
        ("hair styling", "Hair Styling"),
        ("men's grooming", "Men's Grooming"),
        ("fragrance", "Fragrance"),
    ],

    no_products_selected:
        "No products selected yet. Toggle products above to add them to your routine.",
    no_products_found: "No products found matching your criteria",
    select_category: "Select a category above to view products",
    added_product: "Added \"{product}\" to your routine",
    removed_product: "Removed \"{product}\" from your routine",
    cleared_all: "Cleared all products from your routine",
    select_at_least_one: "Please select at least one product to generate a routine",
    error_generating: "Sorry, there was an error generating your routine. Please try again.",
    error_chat: "Sorry, I encountered an error. Please try asking again.",

    live_search_enabled: "Real-time product updates enabled (experimental feature)",
    live_search_disabled: "Using local product database",
    searching_live: "Searching for \"{query}\" with real-time updates...",
    search_complete: "Search completed with latest product information",

    welcome: "✨ Welcome to the Smart Routine Builder! I'm here to help you create the perfect beauty routine.\n\n\
🔸 Browse products by category or search by name\n\
🔸 Toggle products to add them to your routine\n\
🔸 Open a product for detailed information\n\
🔸 Generate a personalized routine when ready\n\
🔸 Ask me any questions about your products!\n\n\
How can I assist you today?",

    routine_intro:
        "Create a comprehensive skincare/beauty routine using these selected products:",
    routine_tips: "**Additional Tips:**",
};

static AR: Translations = Translations {
    page_title: "منشئ روتين ريتو",
    product_selection: "اختيار المنتجات",
    selected_products_title: "المنتجات المختارة",
    chat_title: "دعنا نبني روتينك",

    category_select: "اختر فئة",
    search_placeholder: "ابحث عن المنتجات بالاسم أو الكلمة المفتاحية...",
    chat_placeholder: "اسألني عن المنتجات أو الروتين...",

    generate_routine: "✨ إنشاء روتيني",
    generating: "✨ جاري الإنشاء...",
    clear_all: "مسح الكل",
    add_to_routine: "إضافة إلى روتيني",
    added_to_routine: "تمت الإضافة للروتين",
    remove_from_routine: "إزالة من الروتين",

    categories: &[
        ("cleanser", "منظف الوجه"),
        ("moisturizer", "مرطب"),
        ("skincare", "العناية بالبشرة والسيروم"),
        ("suncare", "واقي الشمس"),
        ("makeup", "مكياج"),
        ("haircare", "العناية بالشعر"),
        ("hair color", "صبغة الشعر"),
        ("hair styling", "تصفيف الشعر"),
        ("men's grooming", "العناية بالرجال"),
        ("fragrance", "العطور"),
    ],

    no_products_selected: "لم يتم اختيار أي منتجات بعد. انقر على المنتجات أعلاه لإضافتها إلى روتينك.",
    no_products_found: "لم يتم العثور على منتجات تطابق معاييرك",
    select_category: "اختر فئة أعلاه لعرض المنتجات",
    added_product: "تمت إضافة \"{product}\" إلى روتينك",
    removed_product: "تمت إزالة \"{product}\" من روتينك",
    cleared_all: "تم مسح جميع المنتجات من روتينك",
    select_at_least_one: "يرجى اختيار منتج واحد على الأقل لإنشاء روتين",
    error_generating: "عذراً، حدث خطأ في إنشاء روتينك. يرجى المحاولة مرة أخرى.",
    error_chat: "عذراً، واجهت خطأ. يرجى المحاولة مرة أخرى.",

    live_search_enabled: "تم تفعيل التحديثات الفورية للمنتجات (ميزة تجريبية)",
    live_search_disabled: "استخدام قاعدة البيانات المحلية للمنتجات",
    searching_live: "البحث عن \"{query}\" مع التحديثات الفورية...",
    search_complete: "اكتمل البحث مع أحدث معلومات المنتجات",

    welcome: "✨ مرحباً بك في منشئ الروتين الذكي! أنا هنا لمساعدتك في إنشاء روتين الجمال المثالي.\n\n\
🔸 تصفح المنتجات حسب الفئة أو ابحث بالاسم\n\
🔸 انقر على المنتجات لإضافتها إلى روتينك\n\
🔸 افتح المنتج للحصول على معلومات مفصلة\n\
🔸 أنشئ روتيناً مخصصاً عندما تكون جاهزاً\n\
🔸 اسألني أي أسئلة عن منتجاتك!\n\n\
كيف يمكنني مساعدتك اليوم؟",

    routine_intro: "أنشئ روتين شامل للعناية بالبشرة/الجمال باستخدام هذه المنتجات المختارة:",
    routine_tips: "**نصائح إضافية:**",
};

static HE: Translations = Translations {
    page_title: "בונה השגרה של ריטו",
    product_selection: "בחירת מוצרים",
    selected_products_title: "מוצרים נבחרים",
    chat_title: "בואו נבנה את השגרה שלך",

    category_select: "בחר קטגוריה",
    search_placeholder: "חפש מוצרים לפי שם או מילת מפתח...",
    chat_placeholder: "שאל אותי על מוצרים או שגרות...",

    generate_routine: "✨ צור את השגרה שלי",
    generating: "✨ יוצר...",
    clear_all: "נקה הכל",
    add_to_routine: "הוסף לשגרה שלי",
    added_to_routine: "נוסף לשגרה",
    remove_from_routine: "הסר מהשגרה",

    categories: &[
        ("cleanser", "מנקה פנים"),
        ("moisturizer", "קרם לחות"),
        ("skincare", "טיפוח עור וסרום"),
        ("suncare", "קרם הגנה"),
        ("makeup", "איפור"),
        ("haircare", "טיפוח שיער"),
        ("hair color", "צבע שיער"),
        ("hair styling", "עיצוב שיער"),
        ("men's grooming", "טיפוח גברים"),
        ("fragrance", "בושם"),
    ],

    no_products_selected: "עדיין לא נבחרו מוצרים. לחץ על מוצרים למעלה כדי להוסיף אותם לשגרה שלך.",
    no_products_found: "לא נמצאו מוצרים התואמים את הקריטריונים שלך",
    select_category: "בחר קטגוריה למעלה כדי לצפות במוצרים",
    added_product: "נוסף \"{product}\" לשגרה שלך",
    removed_product: "הוסר \"{product}\" מהשגרה שלך",
    cleared_all: "נוקו כל המוצרים מהשגרה שלך",
    select_at_least_one: "אנא בחר לפחות מוצר אחד כדי ליצור שגרה",
    error_generating: "מצטער, הייתה שגיאה ביצירת השגרה שלך. אנא נסה שוב.",
    error_chat: "מצטער, נתקלתי בשגיאה. אנא נסה לשאול שוב.",

    live_search_enabled: "עדכונים בזמן אמת של מוצרים מופעלים (תכונה ניסיונית)",
    live_search_disabled: "שימוש במסד נתונים מקומי של מוצרים",
    searching_live: "מחפש \"{query}\" עם עדכונים בזמן אמת...",
    search_complete: "החיפוש הושלם עם המידע העדכני ביותר על המוצרים",

    welcome: "✨ ברוכים הבאים לבונה השגרה החכם! אני כאן כדי לעזור לך ליצור את שגרת היופי המושלמת.\n\n\
🔸 עיין במוצרים לפי קטגוריה או חפש לפי שם\n\
🔸 לחץ על מוצרים כדי להוסיף אותם לשגרה שלך\n\
🔸 פתח מוצר למידע מפורט\n\
🔸 צור שגרה מותאמת אישית כשאתה מוכן\n\
🔸 שאל אותי כל שאלה על המוצרים שלך!\n\n\
איך אני יכול לעזור לך היום?",

    routine_intro: "צור שגרת טיפוח עור/יופי מקיפה באמצעות המוצרים הנבחרים:",
    routine_tips: "**טיפים נוספים:**",
};

static FR: Translations = Translations {
    page_title: "Créateur de Routine Ritu",
    product_selection: "Sélection de Produits",
    selected_products_title: "Produits Sélectionnés",
    chat_title: "Créons Votre Routine",

    category_select: "Choisir une catégorie",
    search_placeholder: "Rechercher des produits par nom ou mot-clé...",
    chat_placeholder: "Demandez-moi des produits ou des routines...",

    generate_routine: "✨ Générer Ma Routine",
    generating: "✨ Génération...",
    clear_all: "Tout Effacer",
    add_to_routine: "Ajouter à Ma Routine",
    added_to_routine: "Ajouté à la Routine",
    remove_from_routine: "Retirer de la routine",

    categories: &[
        ("cleanser", "Nettoyant Visage"),
        ("moisturizer", "Hydratant"),
        ("skincare", "Soins de la Peau et Sérums"),
        ("suncare", "Protection Solaire"),
        ("makeup", "Maquillage"),
        ("haircare", "Soins Capillaires"),
        ("hair color", "Coloration Cheveux"),
        ("hair styling", "Coiffage Cheveux"),
        ("men's grooming", "Soins Homme"),
        ("fragrance", "Parfum"),
    ],

    no_products_selected:
        "Aucun produit sélectionné pour le moment. Cliquez sur les produits ci-dessus pour les ajouter à votre routine.",
    no_products_found: "Aucun produit trouvé correspondant à vos critères",
    select_category: "Sélectionnez une catégorie ci-dessus pour voir les produits",
    added_product: "Ajouté \"{product}\" à votre routine",
    removed_product: "Retiré \"{product}\" de votre routine",
    cleared_all: "Effacé tous les produits de votre routine",
    select_at_least_one: "Veuillez sélectionner au moins un produit pour générer une routine",
    error_generating:
        "Désolé, il y a eu une erreur lors de la génération de votre routine. Veuillez réessayer.",
    error_chat: "Désolé, j'ai rencontré une erreur. Veuillez réessayer.",

    live_search_enabled:
        "Mises à jour des produits en temps réel activées (fonctionnalité expérimentale)",
    live_search_disabled: "Utilisation de la base de données locale des produits",
    searching_live: "Recherche de \"{query}\" avec des mises à jour en temps réel...",
    search_complete: "Recherche terminée avec les dernières informations produits",

    welcome: "✨ Bienvenue dans le Créateur de Routine Intelligent ! Je suis là pour vous aider à créer la routine beauté parfaite.\n\n\
🔸 Parcourez les produits par catégorie ou recherchez par nom\n\
🔸 Cliquez sur les produits pour les ajouter à votre routine\n\
🔸 Ouvrez un produit pour des informations détaillées\n\
🔸 Générez une routine personnalisée quand vous êtes prêt\n\
🔸 Posez-moi toute question sur vos produits !\n\n\
Comment puis-je vous aider aujourd'hui ?",

    routine_intro:
        "Créez une routine complète de soins de la peau/beauté en utilisant ces produits sélectionnés:",
    routine_tips: "**Conseils Supplémentaires:**",
};

static ES: Translations = Translations {
    page_title: "Creador de Rutina Ritu",
    product_selection: "Selección de Productos",
    selected_products_title: "Productos Seleccionados",
    chat_title: "Creemos Tu Rutina",

    category_select: "Elegir una categoría",
    search_placeholder: "Buscar productos por nombre o palabra clave...",
    chat_placeholder: "Pregúntame sobre productos o rutinas...",

    generate_routine: "✨ Generar Mi Rutina",
    generating: "✨ Generando...",
    clear_all: "Limpiar Todo",
    add_to_routine: "Añadir a Mi Rutina",
    added_to_routine: "Añadido a la Rutina",
    remove_from_routine: "Quitar de la rutina",

    categories: &[
        ("cleanser", "Limpiador Facial"),
        ("moisturizer", "Hidratante"),
        ("skincare", "Cuidado de la Piel y Sueros"),
        ("suncare", "Protector Solar"),
        ("makeup", "Maquillaje"),
        ("haircare", "Cuidado Capilar"),
        ("hair color", "Color de Cabello"),
        ("hair styling", "Peinado"),
        ("men's grooming", "Cuidado Masculino"),
        ("fragrance", "Fragancia"),
    ],

    no_products_selected:
        "Aún no hay productos seleccionados. Haz clic en los productos de arriba para añadirlos a tu rutina.",
    no_products_found: "No se encontraron productos que coincidan con tus criterios",
    select_category: "Selecciona una categoría arriba para ver productos",
    added_product: "Añadido \"{product}\" a tu rutina",
    removed_product: "Quitado \"{product}\" de tu rutina",
    cleared_all: "Limpiados todos los productos de tu rutina",
    select_at_least_one: "Por favor selecciona al menos un producto para generar una rutina",
    error_generating: "Lo siento, hubo un error generando tu rutina. Por favor inténtalo de nuevo.",
    error_chat: "Lo siento, encontré un error. Por favor pregunta de nuevo.",

    live_search_enabled:
        "Actualizaciones de productos en tiempo real habilitadas (función experimental)",
    live_search_disabled: "Usando base de datos local de productos",
    searching_live: "Buscando \"{query}\" con actualizaciones en tiempo real...",
    search_complete: "Búsqueda completada con la información más reciente de productos",

    welcome: "✨ ¡Bienvenido al Creador de Rutina Inteligente! Estoy aquí para ayudarte a crear la rutina de belleza perfecta.\n\n\
🔸 Navega productos por categoría o busca por nombre\n\
🔸 Haz clic en productos para añadirlos a tu rutina\n\
🔸 Abre un producto para información detallada\n\
🔸 Genera una rutina personalizada cuando estés listo\n\
🔸 ¡Pregúntame cualquier cosa sobre tus productos!\n\n\
¿Cómo puedo ayudarte hoy?",

    routine_intro:
        "Crea una rutina integral de cuidado de la piel/belleza usando estos productos seleccionados:",
    routine_tips: "**Consejos Adicionales:**",
};
