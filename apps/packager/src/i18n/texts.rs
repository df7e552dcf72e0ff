//! Literal texts of the front end, keyed by semantic key and language.

use crate::i18n::{Localized, TranslationRegistry};

pub static TRANSLATIONS: TranslationRegistry = TranslationRegistry {
    titles: Localized {
        en: "Your Big Five Personality Profile (T scores)",
        zh: "你的大五人格雷达图（T分）",
        es: "Tu Perfil de Personalidad Big Five (Puntajes T)",
        fr: "Votre profil de personnalité Big Five (scores T)",
        ru: "Ваш профиль личности по Big Five (T-баллы)",
        ar: "ملف الشخصية الخاص بك (Big Five) بدرجات T",
    },
    trait_names: Localized {
        en: [
            "Neuroticism",
            "Extraversion",
            "Openness",
            "Agreeableness",
            "Conscientiousness",
        ],
        zh: [
            "神经质",
            "外向性",
            "开放性",
            "宜人性",
            "尽责性",
        ],
        es: [
            "Neuroticismo",
            "Extraversión",
            "Apertura",
            "Amabilidad",
            "Conciencia",
        ],
        fr: [
            "Névrosisme",
            "Extraversion",
            "Ouverture",
            "Amabilité",
            "Conscienciosité",
        ],
        ru: [
            "Невротизм",
            "Экстраверсия",
            "Открытость",
            "Доброжелательность",
            "Сознательность",
        ],
        ar: [
            "الضيق العصبي",
            "الانفتاح",
            "الانبساطية",
            "التعاطف",
            "الضمير المهني",
        ],
    },
    disclaimer: Localized {
        en: "The career recommendations provided here are for your reference only. It's important to consider your personal circumstances, preferences, and goals when making a career decision. We encourage you to explore different options and take the time to evaluate each one carefully. May you find a fulfilling and rewarding career that aligns with your values and aspirations. Best of luck on your journey to success! 😊",
        zh: "这里提供的职业推荐仅供参考。在做出职业选择时，请务必考虑您的个人情况、兴趣和目标。我们鼓励您探索不同的职业选项，并仔细评估每一个选择。希望您能够找到一个符合自己价值观和人生目标的理想职业，祝您在职业生涯中取得圆满成功！😊",
        es: "Las recomendaciones de carrera proporcionadas aquí son solo para su referencia. Es importante tener en cuenta sus circunstancias personales, preferencias y objetivos al tomar una decisión sobre su carrera. Le animamos a explorar diferentes opciones y tomarse el tiempo necesario para evaluar cada una de ellas con cuidado. ¡Le deseamos mucho éxito en su camino hacia una carrera gratificante y satisfactoria! 😊",
        fr: "Les recomendaciones de carrière fournies aquí son uniquement à titre de référence. Il est important de prendre en compte vos circonstances personnelles, vos préférences et vos objectifs lorsque vous prenez una décision concernant votre carrière. Nous vous encourageons à explorer diferentes opciones et à prendre le temps d'évaluer cada choix avec soin. Nous vous souhaitons de trouver une carrière épanouissante et gratifiante qui corresponde à vos valeurs et aspirations. Bonne chance dans votre parcours vers le succès ! 😊",
        ru: "Предоставленные рекомендации по карьере предназначены только для вашего ознакомления. Важно учитывать ваши личные обстоятельства, предпочтения и цели при принятии решения о карьере. Мы призываем вас исследовать различные варианты и уделять достаточно времени на тщательную оценку каждого из них. Желаем вам найти карьеру, которая будет соответствовать вашим ценностям и устремлениям, и успешного пути к успеху! 😊",
        ar: "التوصيات المهنية المقدمة здесь предназначены только для справки. Важно учитывать ваши личные обстоятельства, предпочтения и цели при принятии решения о карьере. Мы призываем вас исследовать различные варианты и уделять достаточно времени на тщательную оценку каждого из них. Желаем вам найти карьеру, которая будет соответствовать вашим ценностям и устремлениям, и успешного пути к успеху! 😊",
    },
    ideal_job_prompt: Localized {
        en: "Please enter your ideal career (e.g., Data Scientist):",
        zh: "请输入您的理想职业（例如：数据科学家）：",
        es: "Por favor, introduzca su carrera ideal (por ejemplo: Científico de datos):",
        fr: "Veuillez saisir votre métier idéal (par exemple : Data Scientist) :",
        ru: "Пожалуйста, введите вашу идеальную профессию (например: специалист по данным):",
        ar: "يرجى إدخال مهنتك المثالية (مثال: عالم بيانات):",
    },
    ideal_job_warning: Localized {
        en: "⚠️ Please enter your ideal career.",
        zh: "⚠️ 请输入您的理想职业。",
        es: "⚠️ Por favor, introduzca su carrera ideal.",
        fr: "⚠️ Veuillez saisir votre métier idéal.",
        ru: "⚠️ Пожалуйста, введите вашу идеальную профессию.",
        ar: "⚠️ يرجى إدخال مهنتك المثالية.",
    },
    ideal_job_result: Localized {
        en: "The career closest to your ideal is: **{}**",
        zh: "您的理想职业最相近的是：**{}**",
        es: "La carrera más cercana a su ideal es: **{}**",
        fr: "Le métier le plus proche de votre idéal est : **{}**",
        ru: "Самая близкая к вашей идеальной профессия: **{}**",
        ar: "أقرب مهنة к вашей идеальной профессии: **{}**",
    },
    closest_text: Localized {
        en: "Your trait closest to the ideal career:",
        zh: "与理想职业特征最接近的是：",
        es: "Tu rasgo más cercano al trabajo ideal:",
        fr: "Votre trait le plus proche du métier idéal :",
        ru: "Ваша черта, наиболее близкая к идеальной профессии:",
        ar: "سمتك الأقرب إلى المهنة المثالية:",
    },
    furthest_text: Localized {
        en: "Your trait furthest from the ideal career:",
        zh: "与理想职业特征差距最大的是：",
        es: "Tu rasgo más alejado del trabajo ideal:",
        fr: "Votre trait le plus éloigné du métier idéal :",
        ru: "Ваша черта, наиболее далёкая от идеальной профессии:",
        ar: "سمتك الأبعد عن المهنة المثالية:",
    },
};
